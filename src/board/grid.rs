//! The 10×10 chip grid.
//!
//! Cells are empty or hold a coloured chip, which may be locked once it
//! belongs to a recorded sequence. Corners never hold a chip; on the read
//! side they report [`CellState::Wild`] and match every colour.
//!
//! Backed by `im::Vector` so snapshots clone the grid in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Color, Coord, GameError, BOARD_SIZE, CELL_COUNT};

/// Observable state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// A permanently wild corner.
    Wild,
    Empty,
    Occupied { color: Color, locked: bool },
}

impl CellState {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            CellState::Occupied { color, .. } => Some(color),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, CellState::Occupied { locked: true, .. })
    }
}

/// Stored chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Chip {
    color: Color,
    locked: bool,
}

/// Board of chips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vector<Option<Chip>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: std::iter::repeat(None).take(CELL_COUNT).collect(),
        }
    }

    /// Read a cell.
    #[must_use]
    pub fn get(&self, cell: Coord) -> CellState {
        if cell.is_corner() {
            return CellState::Wild;
        }
        match self.cells.get(cell.index()).copied().flatten() {
            Some(chip) => CellState::Occupied {
                color: chip.color,
                locked: chip.locked,
            },
            None => CellState::Empty,
        }
    }

    /// Put a chip of `color` on an empty non-corner cell.
    pub fn place(&mut self, cell: Coord, color: Color) -> Result<(), GameError> {
        match self.get(cell) {
            CellState::Wild => Err(GameError::CornerForbidden(cell)),
            CellState::Occupied { .. } => Err(GameError::Occupied(cell)),
            CellState::Empty => {
                self.cells.set(cell.index(), Some(Chip { color, locked: false }));
                Ok(())
            }
        }
    }

    /// Take the chip off an unlocked cell, returning its colour.
    pub fn remove(&mut self, cell: Coord) -> Result<Color, GameError> {
        match self.get(cell) {
            CellState::Wild | CellState::Empty => Err(GameError::NoTarget(cell)),
            CellState::Occupied { locked: true, .. } => Err(GameError::Locked(cell)),
            CellState::Occupied { color, .. } => {
                self.cells.set(cell.index(), None);
                Ok(color)
            }
        }
    }

    /// Lock every occupied cell in `cells`. Corners and empty cells are
    /// ignored.
    pub fn lock(&mut self, cells: &[Coord]) {
        for &cell in cells {
            if cell.is_corner() {
                continue;
            }
            if let Some(Some(chip)) = self.cells.get_mut(cell.index()) {
                chip.locked = true;
            }
        }
    }

    /// True for a corner or a chip of `color`.
    #[must_use]
    pub fn is_wild_or_color(&self, cell: Coord, color: Color) -> bool {
        match self.get(cell) {
            CellState::Wild => true,
            CellState::Occupied { color: c, .. } => c == color,
            CellState::Empty => false,
        }
    }

    /// Number of chips on the board.
    #[must_use]
    pub fn chip_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major grid of cell states.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<CellState>> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| self.get(Coord::at(row as u8, col as u8)))
                    .collect()
            })
            .collect()
    }
}

/// Wire form: row-major grid of [`CellState`].
impl Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let rows = Vec::<Vec<CellState>>::deserialize(deserializer)?;
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(D::Error::custom("board must be 10x10"));
        }

        let mut board = Board::new();
        for coord in Coord::all() {
            let state = rows[coord.row as usize][coord.col as usize];
            match (coord.is_corner(), state) {
                (true, CellState::Wild) | (false, CellState::Empty) => {}
                (false, CellState::Occupied { color, locked }) => {
                    board.cells.set(coord.index(), Some(Chip { color, locked }));
                }
                _ => return Err(D::Error::custom(format!("invalid cell state at {coord}"))),
            }
        }
        Ok(board)
    }
}
