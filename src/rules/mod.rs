//! Move validation, turn order and win evaluation.
//!
//! Rooms call into `RulesEngine` for every submitted move:
//! - `engine`: card-class legality and move application
//! - `win`: sequence recording, win thresholds, turn rotation
//! - `state`: the game-scoped board, piles and sequence record
//!
//! The rules never see player rosters or phases; the room resolves the
//! acting colour and turn gate before delegating here.

pub mod engine;
pub mod state;
pub mod win;

pub use engine::{Move, MoveOutcome, Play, PlayAction, RulesEngine, SequenceRules};
pub use state::{GameResult, GameState, Hand};
pub use win::{first_turn, next_turn, record_and_evaluate, Evaluation};
