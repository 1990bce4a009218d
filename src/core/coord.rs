//! Board coordinates.
//!
//! The board is a fixed 10×10 grid. Rows and columns are 0-based; the four
//! corners are permanently wild and never hold a chip.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Board edge length.
pub const BOARD_SIZE: usize = 10;

/// Total number of cells.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of cells that can hold a chip.
pub const NON_CORNER_COUNT: usize = CELL_COUNT - 4;

/// A cell position on the board.
///
/// Values received over the wire are unchecked; use [`Coord::validate`]
/// before indexing with them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// The four wild corners.
    pub const CORNERS: [Coord; 4] = [
        Coord::at(0, 0),
        Coord::at(0, 9),
        Coord::at(9, 0),
        Coord::at(9, 9),
    ];

    /// Construct without bounds checking. Only for compile-time constants
    /// and values already known to be on the board.
    #[must_use]
    pub const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Construct a coordinate, rejecting anything off the board.
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self::at(row as u8, col as u8))
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// Re-check a coordinate that arrived from outside the engine.
    pub fn validate(self) -> Result<Self, GameError> {
        Self::new(self.row as usize, self.col as usize)
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        let edge = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == edge) && (self.col == 0 || self.col == edge)
    }

    /// Row-major index into a flat grid.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::at((index / BOARD_SIZE) as u8, (index % BOARD_SIZE) as u8)
    }

    /// Step by `(dr, dc)`, returning `None` when leaving the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }

    /// Every cell that can hold a chip, row-major.
    pub fn non_corners() -> impl Iterator<Item = Coord> {
        Self::all().filter(|c| !c.is_corner())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(Coord::all().filter(|c| c.is_corner()).count(), 4);
        assert_eq!(Coord::non_corners().count(), NON_CORNER_COUNT);
        for corner in Coord::CORNERS {
            assert!(corner.is_corner());
        }
        assert!(!Coord::at(0, 1).is_corner());
    }

    #[test]
    fn test_bounds() {
        assert!(Coord::new(9, 9).is_ok());
        assert!(matches!(Coord::new(10, 0), Err(GameError::OutOfBounds { .. })));
        assert!(Coord::at(3, 12).validate().is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Coord::at(0, 0).offset(1, 1), Some(Coord::at(1, 1)));
        assert_eq!(Coord::at(0, 0).offset(-1, 0), None);
        assert_eq!(Coord::at(9, 5).offset(1, 0), None);
    }

    #[test]
    fn test_index_round_trip() {
        for c in Coord::all() {
            assert_eq!(Coord::from_index(c.index()), c);
        }
    }
}
