//! Card-to-cell layout.
//!
//! Each of the 48 positional identities is bound to exactly two non-corner
//! cells, and every non-corner cell belongs to exactly one identity. The
//! layout is generated once per room and never changes afterwards, so the
//! board picture is stable across rematches.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Card, Coord, GameRng, BOARD_SIZE, CELL_COUNT};

/// Fixed bijection between positional cards and cell pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutMap {
    pairs: FxHashMap<Card, [Coord; 2]>,
    by_cell: Vec<Option<Card>>,
}

impl LayoutMap {
    /// Randomly partition the 96 non-corner cells into 48 pairs, one per
    /// positional card.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut cells: Vec<Coord> = Coord::non_corners().collect();
        rng.shuffle(&mut cells);

        let mut pairs = FxHashMap::default();
        let mut by_cell = vec![None; CELL_COUNT];

        for (card, chunk) in Card::positional_set().zip(cells.chunks_exact(2)) {
            let mut pair = [chunk[0], chunk[1]];
            pair.sort();
            for cell in pair {
                by_cell[cell.index()] = Some(card);
            }
            pairs.insert(card, pair);
        }

        Self { pairs, by_cell }
    }

    /// Rebuild a layout from a serialized grid.
    ///
    /// Returns `None` unless the grid is a valid bijection.
    #[must_use]
    pub fn from_grid(grid: &LayoutGrid) -> Option<Self> {
        if grid.len() != BOARD_SIZE || grid.iter().any(|row| row.len() != BOARD_SIZE) {
            return None;
        }

        let mut cells: FxHashMap<Card, Vec<Coord>> = FxHashMap::default();
        let mut by_cell = vec![None; CELL_COUNT];
        for coord in Coord::all() {
            let entry = grid[coord.row as usize][coord.col as usize];
            match (coord.is_corner(), entry) {
                (true, None) => {}
                (false, Some(card)) if card.is_positional() => {
                    cells.entry(card).or_default().push(coord);
                    by_cell[coord.index()] = Some(card);
                }
                _ => return None,
            }
        }

        if cells.len() != Card::POSITIONAL || cells.values().any(|c| c.len() != 2) {
            return None;
        }

        let pairs = cells
            .into_iter()
            .map(|(card, mut c)| {
                c.sort();
                (card, [c[0], c[1]])
            })
            .collect();

        Some(Self { pairs, by_cell })
    }

    /// The two cells bound to a positional card. `None` for jacks.
    #[must_use]
    pub fn cells_for(&self, card: Card) -> Option<[Coord; 2]> {
        self.pairs.get(&card).copied()
    }

    /// The card pictured on a cell. `None` for corners.
    #[must_use]
    pub fn card_at(&self, cell: Coord) -> Option<Card> {
        self.by_cell.get(cell.index()).copied().flatten()
    }

    /// Is `cell` one of `card`'s bound cells?
    #[must_use]
    pub fn binds(&self, card: Card, cell: Coord) -> bool {
        self.cells_for(card).is_some_and(|pair| pair.contains(&cell))
    }

    /// Row-major grid of pictured cards, corners `None`.
    #[must_use]
    pub fn grid(&self) -> LayoutGrid {
        self.by_cell
            .chunks(BOARD_SIZE)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Iterate every (card, cells) binding.
    pub fn iter(&self) -> impl Iterator<Item = (Card, [Coord; 2])> + '_ {
        self.pairs.iter().map(|(card, cells)| (*card, *cells))
    }
}

/// 10×10 picture grid as sent to clients.
pub type LayoutGrid = Vec<Vec<Option<Card>>>;

/// Wire form of a layout.
impl Serialize for LayoutMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.grid().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LayoutMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grid = LayoutGrid::deserialize(deserializer)?;
        LayoutMap::from_grid(&grid)
            .ok_or_else(|| serde::de::Error::custom("layout grid is not a valid card bijection"))
    }
}
