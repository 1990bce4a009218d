//! Sequence detection and de-duplication.
//!
//! After a chip lands, the detector walks the four axes through that cell
//! and collects every maximal run of matching-or-wild cells. Runs of at
//! least `sequence_length` become candidates, canonicalized as the sorted
//! set of their non-corner cells. A [`SequenceSet`] records each canonical
//! set at most once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::Board;
use crate::core::{Color, Coord, RulesConfig, BOARD_SIZE};

/// Horizontal, vertical, main diagonal, anti-diagonal.
pub const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Canonical cell set: sorted, corners excluded.
pub type CellSet = SmallVec<[Coord; BOARD_SIZE]>;

/// A recorded (or candidate) sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub color: Color,
    /// Sorted non-corner cells.
    pub cells: CellSet,
    /// Run length including wild corners.
    pub length: usize,
}

impl Sequence {
    /// Sequence-points this sequence is worth toward the win threshold.
    #[must_use]
    pub fn points(&self, rules: &RulesConfig) -> u32 {
        if rules.long_run_double_credit && self.length >= rules.long_run_length {
            2
        } else {
            1
        }
    }

    #[must_use]
    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }
}

/// Collect the maximal run through `origin` along `(dr, dc)`.
///
/// Returned cells are ordered from one end of the run to the other and
/// include corners.
#[must_use]
pub fn run_through(board: &Board, origin: Coord, color: Color, (dr, dc): (i8, i8)) -> Vec<Coord> {
    let mut start = origin;
    while let Some(prev) = start.offset(-dr, -dc) {
        if !board.is_wild_or_color(prev, color) {
            break;
        }
        start = prev;
    }

    let mut run = vec![start];
    let mut cursor = start;
    while let Some(next) = cursor.offset(dr, dc) {
        if !board.is_wild_or_color(next, color) {
            break;
        }
        run.push(next);
        cursor = next;
    }
    run
}

/// Every candidate sequence through `changed` for `color`.
///
/// At most one candidate per direction. Candidates are returned in
/// [`DIRECTIONS`] order and may overlap each other.
#[must_use]
pub fn detect(board: &Board, changed: Coord, color: Color, rules: &RulesConfig) -> Vec<Sequence> {
    if !board.is_wild_or_color(changed, color) {
        return Vec::new();
    }

    DIRECTIONS
        .iter()
        .filter_map(|&dir| {
            let run = run_through(board, changed, color, dir);
            if run.len() < rules.sequence_length {
                return None;
            }
            let mut cells: CellSet = run.iter().copied().filter(|c| !c.is_corner()).collect();
            cells.sort_unstable();
            Some(Sequence {
                color,
                cells,
                length: run.len(),
            })
        })
        .collect()
}

/// Recorded sequences for one game, in recording order, with O(1)
/// membership by canonical cell set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceSet {
    recorded: Vec<Sequence>,
    keys: FxHashSet<CellSet>,
}

impl SequenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this canonical set been recorded?
    #[must_use]
    pub fn contains(&self, cells: &CellSet) -> bool {
        self.keys.contains(cells)
    }

    /// Record a sequence. Returns `false` if its cell set is already known.
    pub fn record(&mut self, sequence: Sequence) -> bool {
        if !self.keys.insert(sequence.cells.clone()) {
            return false;
        }
        self.recorded.push(sequence);
        true
    }

    /// Total sequence-points credited to `color`.
    #[must_use]
    pub fn points_for(&self, color: Color, rules: &RulesConfig) -> u32 {
        self.recorded
            .iter()
            .filter(|s| s.color == color)
            .map(|s| s.points(rules))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.recorded.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

impl Serialize for SequenceSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.recorded.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SequenceSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let recorded = Vec::<Sequence>::deserialize(deserializer)?;
        let mut set = SequenceSet::new();
        for sequence in recorded {
            set.record(sequence);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TeamColor;

    const RED: Color = Color::Team(TeamColor::Red);
    const BLUE: Color = Color::Team(TeamColor::Blue);

    fn board_with(cells: &[(u8, u8)], color: Color) -> Board {
        let mut board = Board::new();
        for &(r, c) in cells {
            board.place(Coord::at(r, c), color).unwrap();
        }
        board
    }

    #[test]
    fn test_four_in_a_row_is_not_a_sequence() {
        let board = board_with(&[(4, 1), (4, 2), (4, 3), (4, 4)], RED);
        assert!(detect(&board, Coord::at(4, 4), RED, &RulesConfig::default()).is_empty());
    }

    #[test]
    fn test_horizontal_five() {
        let board = board_with(&[(4, 1), (4, 2), (4, 3), (4, 4), (4, 5)], RED);
        let found = detect(&board, Coord::at(4, 3), RED, &RulesConfig::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].length, 5);
        assert_eq!(found[0].cells.as_slice(), &[
            Coord::at(4, 1),
            Coord::at(4, 2),
            Coord::at(4, 3),
            Coord::at(4, 4),
            Coord::at(4, 5),
        ]);
    }

    #[test]
    fn test_corner_extends_run() {
        // Corner (0,0) + four chips down the diagonal.
        let board = board_with(&[(1, 1), (2, 2), (3, 3), (4, 4)], BLUE);
        let found = detect(&board, Coord::at(2, 2), BLUE, &RulesConfig::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].length, 5);
        assert_eq!(found[0].cells.len(), 4);
        assert!(!found[0].cells.contains(&Coord::at(0, 0)));
    }

    #[test]
    fn test_opposing_chip_breaks_run() {
        let mut board = board_with(&[(6, 0), (6, 1), (6, 3), (6, 4), (6, 5)], RED);
        board.place(Coord::at(6, 2), BLUE).unwrap();
        assert!(detect(&board, Coord::at(6, 4), RED, &RulesConfig::default()).is_empty());
    }

    #[test]
    fn test_anti_diagonal() {
        let board = board_with(&[(2, 7), (3, 6), (4, 5), (5, 4), (6, 3)], RED);
        let found = detect(&board, Coord::at(4, 5), RED, &RulesConfig::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cells[0], Coord::at(2, 7));
    }

    #[test]
    fn test_cross_closes_two_sequences() {
        let cells = [
            (5, 1), (5, 2), (5, 3), (5, 4), (5, 5),
            (1, 3), (2, 3), (3, 3), (4, 3), (6, 3),
        ];
        let board = board_with(&cells, RED);
        let found = detect(&board, Coord::at(5, 3), RED, &RulesConfig::default());
        assert_eq!(found.len(), 2);
        assert_ne!(found[0].cells, found[1].cells);
    }

    #[test]
    fn test_points_for_long_run() {
        let rules = RulesConfig::default();
        let nine: Vec<(u8, u8)> = (1..=9).map(|c| (3, c)).collect();
        let board = board_with(&nine, RED);
        let found = detect(&board, Coord::at(3, 5), RED, &rules);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].points(&rules), 2);

        let plain = rules.clone().with_long_run_double_credit(false);
        assert_eq!(found[0].points(&plain), 1);
    }

    #[test]
    fn test_full_top_row_counts_both_corners() {
        let row: Vec<(u8, u8)> = (1..=8).map(|c| (0, c)).collect();
        let board = board_with(&row, RED);
        let found = detect(&board, Coord::at(0, 4), RED, &RulesConfig::default());
        assert_eq!(found[0].length, 10);
        assert_eq!(found[0].cells.len(), 8);
    }

    #[test]
    fn test_set_records_once() {
        let board = board_with(&[(4, 1), (4, 2), (4, 3), (4, 4), (4, 5)], RED);
        let rules = RulesConfig::default();
        let mut set = SequenceSet::new();

        for seq in detect(&board, Coord::at(4, 5), RED, &rules) {
            assert!(set.record(seq));
        }
        for seq in detect(&board, Coord::at(4, 1), RED, &rules) {
            assert!(!set.record(seq));
        }
        assert_eq!(set.len(), 1);
        assert_eq!(set.points_for(RED, &rules), 1);
        assert_eq!(set.points_for(BLUE, &rules), 0);
    }

    #[test]
    fn test_set_serde_rebuilds_keys() {
        let board = board_with(&[(7, 1), (7, 2), (7, 3), (7, 4), (7, 5)], BLUE);
        let mut set = SequenceSet::new();
        for seq in detect(&board, Coord::at(7, 3), BLUE, &RulesConfig::default()) {
            set.record(seq);
        }

        let json = serde_json::to_string(&set).unwrap();
        let back: SequenceSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(back.contains(&set.iter().next().unwrap().cells));
    }
}
