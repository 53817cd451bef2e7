//! The grid, stone identities and markers.
//!
//! ## Board
//!
//! An 8×8 grid of `Cell`s with a parallel grid of `StoneId`s. A cell has an
//! identity exactly when it holds a stone. The fields are private: the only
//! way to change a board after construction is through the mutation
//! primitives in `ops`, which keep the two grids and the marker store in
//! step and emit one event per change.
//!
//! ## Markers
//!
//! Special-stone and bomb annotations live in `MarkerStore` (see `markers`).

pub mod markers;
pub mod ops;

pub use markers::{BlastShape, BombData, Marker, MarkerData, MarkerId, MarkerStore, MarkerTag, Special};
pub use ops::{change_owner, destroy, move_stone, spawn, MoveOutcome};

use serde::{Deserialize, Serialize};

use crate::core::{PlayerKey, Pos, StoneId, BOARD_SIZE};

/// Contents of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// The owning player, `None` for an empty cell.
    #[must_use]
    pub const fn owner(self) -> Option<PlayerKey> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(PlayerKey::Black),
            Cell::White => Some(PlayerKey::White),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<PlayerKey> for Cell {
    fn from(player: PlayerKey) -> Self {
        match player {
            PlayerKey::Black => Cell::Black,
            PlayerKey::White => Cell::White,
        }
    }
}

const N: usize = BOARD_SIZE as usize;

/// The 8×8 grid with stable stone identities.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; N]; N],
    ids: [[Option<StoneId>; N]; N],
    next_stone_id: u32,
}

impl Board {
    /// An empty board. Stone ids start at 1.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
            ids: [[None; N]; N],
            next_stone_id: 1,
        }
    }

    /// The standard opening: White on (3,3) and (4,4), Black on (3,4) and
    /// (4,3), ids `s1..s4` in row-major order.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (pos, owner) in [
            (Pos::new(3, 3), PlayerKey::White),
            (Pos::new(3, 4), PlayerKey::Black),
            (Pos::new(4, 3), PlayerKey::Black),
            (Pos::new(4, 4), PlayerKey::White),
        ] {
            board.put(pos, owner);
        }
        board
    }

    /// Build a board from eight rows of `B`, `W` and `.`.
    ///
    /// Stones get ids in row-major order. Other characters and missing
    /// rows or columns are treated as empty.
    ///
    /// ```
    /// use will_reversi::board::Board;
    /// use will_reversi::core::{PlayerKey, Pos};
    ///
    /// let board = Board::from_rows(&["BW", ".B"]);
    /// assert_eq!(board.owner(Pos::new(0, 1)), Some(PlayerKey::White));
    /// assert_eq!(board.count(PlayerKey::Black), 2);
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().take(N).enumerate() {
            for (col, ch) in line.chars().take(N).enumerate() {
                let owner = match ch {
                    'B' | 'b' => PlayerKey::Black,
                    'W' | 'w' => PlayerKey::White,
                    _ => continue,
                };
                board.put(Pos::new(row as u8, col as u8), owner);
            }
        }
        board
    }

    #[must_use]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    #[must_use]
    pub fn owner(&self, pos: Pos) -> Option<PlayerKey> {
        self.get(pos).owner()
    }

    #[must_use]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    #[must_use]
    pub fn stone_id(&self, pos: Pos) -> Option<StoneId> {
        self.ids[pos.row as usize][pos.col as usize]
    }

    /// Number of stones a player has on the board.
    #[must_use]
    pub fn count(&self, player: PlayerKey) -> usize {
        let cell = Cell::from(player);
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Id the next spawned stone will receive.
    #[must_use]
    pub fn next_stone_id(&self) -> StoneId {
        StoneId::new(self.next_stone_id)
    }

    /// Occupied cells of a player, row-major.
    pub fn stones_of(&self, player: PlayerKey) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&p| self.owner(p) == Some(player))
    }

    /// Occupied cells, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&p| !self.is_empty_at(p))
    }

    // === Raw writes, used only by the mutation primitives ===

    fn put(&mut self, pos: Pos, owner: PlayerKey) -> StoneId {
        let id = StoneId::new(self.next_stone_id);
        self.next_stone_id += 1;
        self.cells[pos.row as usize][pos.col as usize] = Cell::from(owner);
        self.ids[pos.row as usize][pos.col as usize] = Some(id);
        id
    }

    fn clear(&mut self, pos: Pos) {
        self.cells[pos.row as usize][pos.col as usize] = Cell::Empty;
        self.ids[pos.row as usize][pos.col as usize] = None;
    }

    fn set_owner(&mut self, pos: Pos, owner: PlayerKey) {
        self.cells[pos.row as usize][pos.col as usize] = Cell::from(owner);
    }

    fn place_existing(&mut self, pos: Pos, cell: Cell, id: Option<StoneId>) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
        self.ids[pos.row as usize][pos.col as usize] = id;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
