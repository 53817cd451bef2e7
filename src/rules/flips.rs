//! Bracketing-line flip rules.
//!
//! A placement at an empty cell flips every straight line of enemy stones
//! that ends in one of the mover's stones. A line is cancelled outright if
//! any stone in it is protected (see `ProtectionSet`). Directions are
//! scanned in `DIRECTIONS` order and flips come out grouped by direction,
//! nearest first, which is the order the pipeline emits events in.

use smallvec::SmallVec;

use crate::board::{Board, MarkerStore};
use crate::core::{PlayerKey, Pos, DIRECTIONS};

/// Cells whose stones cannot be flipped, as a 64-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProtectionSet(u64);

impl ProtectionSet {
    /// Nothing protected.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every cell carrying a flip-blocking special marker.
    #[must_use]
    pub fn from_markers(markers: &MarkerStore) -> Self {
        let mut set = Self::empty();
        for marker in markers.iter() {
            if marker.special().is_some_and(|s| s.blocks_flips()) {
                set.insert(marker.pos);
            }
        }
        set
    }

    const fn bit(pos: Pos) -> u64 {
        if pos.is_on_board() {
            1u64 << (pos.row as u32 * 8 + pos.col as u32)
        } else {
            0
        }
    }

    pub fn insert(&mut self, pos: Pos) {
        self.0 |= Self::bit(pos);
    }

    #[must_use]
    pub const fn contains(&self, pos: Pos) -> bool {
        self.0 & Self::bit(pos) != 0
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Enemy stones bracketed from `origin` in one direction.
///
/// `origin` itself is not inspected, so this serves both placements (origin
/// empty) and captures from an existing stone (regen, chain).
#[must_use]
pub fn directional_flips(
    board: &Board,
    origin: Pos,
    player: PlayerKey,
    dir: (i8, i8),
    protection: &ProtectionSet,
) -> SmallVec<[Pos; 6]> {
    let enemy = Some(player.opponent());
    let mut line = SmallVec::new();
    let mut cursor = origin.offset(dir.0, dir.1);

    while let Some(pos) = cursor {
        if board.owner(pos) != enemy {
            break;
        }
        if protection.contains(pos) {
            return SmallVec::new();
        }
        line.push(pos);
        cursor = pos.offset(dir.0, dir.1);
    }

    match cursor {
        Some(end) if !line.is_empty() && board.owner(end) == Some(player) => line,
        _ => SmallVec::new(),
    }
}

/// All stones bracketed from `origin` in every direction.
#[must_use]
pub fn capture_flips_from(board: &Board, origin: Pos, player: PlayerKey, protection: &ProtectionSet) -> Vec<Pos> {
    DIRECTIONS
        .iter()
        .flat_map(|&dir| directional_flips(board, origin, player, dir, protection))
        .collect()
}

/// Stones a placement at `pos` would flip. Empty if `pos` is occupied or
/// off the board.
#[must_use]
pub fn flips_for(board: &Board, pos: Pos, player: PlayerKey, protection: &ProtectionSet) -> Vec<Pos> {
    if !pos.is_on_board() || !board.is_empty_at(pos) {
        return Vec::new();
    }
    capture_flips_from(board, pos, player, protection)
}

/// Whether a placement at `pos` flips at least one stone.
#[must_use]
pub fn is_legal_move(board: &Board, pos: Pos, player: PlayerKey, protection: &ProtectionSet) -> bool {
    pos.is_on_board()
        && board.is_empty_at(pos)
        && DIRECTIONS
            .iter()
            .any(|&dir| !directional_flips(board, pos, player, dir, protection).is_empty())
}

/// Cells where `player` may place under standard rules, row-major.
#[must_use]
pub fn legal_moves(board: &Board, player: PlayerKey, protection: &ProtectionSet) -> Vec<Pos> {
    Pos::all().filter(|&p| is_legal_move(board, p, player, protection)).collect()
}

/// Cells open to a free placement: every empty cell, row-major.
#[must_use]
pub fn free_placement_moves(board: &Board) -> Vec<Pos> {
    Pos::all().filter(|&p| board.is_empty_at(p)).collect()
}
