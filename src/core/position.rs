//! Board coordinates and stone identity.
//!
//! ## Layout
//!
//! Rows and columns are 0-based, row 0 at the top. Every iteration helper
//! yields cells in row-major order so resolvers touching several cells
//! produce identical event logs on every run.
//!
//! ```
//! use will_reversi::core::Pos;
//!
//! let corner = Pos::new(0, 0);
//! assert_eq!(corner.neighbors().len(), 3);
//! assert!(corner.offset(-1, 0).is_none());
//! assert_eq!(corner.offset(1, 1), Some(Pos::new(1, 1)));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Board edge length.
pub const BOARD_SIZE: u8 = 8;

/// The eight bracketing directions, row-major.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The four orthogonal directions: up, down, left, right.
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell on the 8×8 board.
///
/// Deserializing rejects off-board coordinates, so a position read from a
/// ledger or a snapshot is always on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPos")]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Create a position. Callers must stay inside the board; use
    /// [`Pos::checked`] for untrusted coordinates.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE, "position off the board");
        Self { row, col }
    }

    /// Whether both coordinates are inside the board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Create a position from signed coordinates, `None` when off-board.
    #[must_use]
    pub fn checked(row: i16, col: i16) -> Option<Self> {
        let size = i16::from(BOARD_SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Step by a direction, `None` when the step leaves the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::checked(
            i16::from(self.row) + i16::from(dr),
            i16::from(self.col) + i16::from(dc),
        )
    }

    /// The up-to-eight surrounding cells, row-major.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Pos; 8]> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// The up-to-four orthogonal neighbours, in `ORTHOGONAL` order.
    #[must_use]
    pub fn orthogonal(self) -> SmallVec<[Pos; 4]> {
        ORTHOGONAL
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// The 3×3 block centred on this cell (clipped at the edges), row-major.
    #[must_use]
    pub fn square(self) -> SmallVec<[Pos; 9]> {
        let mut cells = SmallVec::new();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if let Some(p) = self.offset(dr, dc) {
                    cells.push(p);
                }
            }
        }
        cells
    }

    /// The cell plus its orthogonal neighbours, row-major.
    #[must_use]
    pub fn plus(self) -> SmallVec<[Pos; 5]> {
        [(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// Every cell on the board, row-major.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Pos::new(row, col)))
    }
}

#[derive(Deserialize)]
struct RawPos {
    row: u8,
    col: u8,
}

impl TryFrom<RawPos> for Pos {
    type Error = String;

    fn try_from(raw: RawPos) -> Result<Self, Self::Error> {
        let pos = Pos { row: raw.row, col: raw.col };
        if pos.is_on_board() {
            Ok(pos)
        } else {
            Err(format!("position {pos} is off the board"))
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Stable identity of a physical stone.
///
/// Survives owner changes and moves; cleared when the stone is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoneId(pub u32);

impl StoneId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        let cells: Vec<_> = Pos::all().collect();
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0], Pos::new(0, 0));
        assert_eq!(cells[1], Pos::new(0, 1));
        assert_eq!(cells[8], Pos::new(1, 0));
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        assert_eq!(Pos::new(0, 0).neighbors().len(), 3);
        assert_eq!(Pos::new(0, 4).neighbors().len(), 5);
        assert_eq!(Pos::new(3, 3).neighbors().len(), 8);
    }

    #[test]
    fn test_square_and_plus() {
        assert_eq!(Pos::new(3, 3).square().len(), 9);
        assert_eq!(Pos::new(7, 7).square().len(), 4);
        assert_eq!(Pos::new(0, 0).plus().as_slice(), &[Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn test_checked_rejects_off_board() {
        assert!(Pos::checked(-1, 0).is_none());
        assert!(Pos::checked(0, 8).is_none());
        assert_eq!(Pos::checked(7, 7), Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_is_on_board() {
        assert!(Pos::new(7, 7).is_on_board());
        assert!(!Pos { row: 8, col: 0 }.is_on_board());
        assert!(!Pos { row: 0, col: 200 }.is_on_board());
    }

    #[test]
    fn test_deserialize_rejects_off_board() {
        let pos: Pos = serde_json::from_str(r#"{"row":2,"col":5}"#).unwrap();
        assert_eq!(pos, Pos::new(2, 5));

        let err = serde_json::from_str::<Pos>(r#"{"row":9,"col":9}"#).unwrap_err();
        assert!(err.to_string().contains("off the board"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "position off the board")]
    fn test_new_checks_bounds_in_debug() {
        let _ = Pos::new(8, 0);
    }

    #[test]
    fn test_stone_id_display() {
        assert_eq!(StoneId::new(5).to_string(), "s5");
    }
}
