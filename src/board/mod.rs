//! Board state and sequence detection.
//!
//! - `grid`: the 10×10 chip grid with wild corners
//! - `sequence`: line detection and the de-duplicated sequence record

pub mod grid;
pub mod sequence;

pub use grid::{Board, CellState};
pub use sequence::{detect, run_through, CellSet, Sequence, SequenceSet, DIRECTIONS};
