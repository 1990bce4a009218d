//! # sequence-engine
//!
//! Rules engine and room session coordinator for the Sequence board game.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: A rejected intent leaves the room exactly
//!    as it was. Legality is checked in full before anything mutates.
//!
//! 2. **N-Player First**: Every rule that depends on table size takes
//!    `player_count`. Teams and individual players share one `Color` model.
//!
//! 3. **Configuration Over Convention**: House rules (long-run credit,
//!    host readiness, hand visibility) are flags on `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The board is an `im::Vector`, so the
//!   per-member snapshot built after every move clones it in O(1).
//!
//! - **Deterministic Seeding**: All shuffles, layouts, codes and first-turn
//!   picks draw from `GameRng`. A fixed registry seed reproduces a session.
//!
//! - **Room Isolation**: Rooms share nothing. A panicking handler closes its
//!   own room and no other.
//!
//! ## Modules
//!
//! - `core`: Cards, coordinates, players and colours, RNG, config, errors
//! - `cards`: The 104-card deck and the per-room layout map
//! - `board`: Chip grid and sequence detection
//! - `rules`: `RulesEngine` trait, move legality, win evaluation
//! - `session`: Rooms, the registry, commands, events, snapshots, wire codec

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardClass, Rank, Suit,
    Coord, BOARD_SIZE,
    Color, PlayerId, TeamColor,
    GameRng,
    HandVisibility, RegistryConfig, RulesConfig,
    ErrorKind, ErrorResponse, GameError,
};

pub use crate::cards::{Deck, LayoutMap, DECK_SIZE};

pub use crate::board::{Board, CellState, Sequence, SequenceSet};

pub use crate::rules::{GameResult, GameState, Move, MoveOutcome, PlayAction, RulesEngine, SequenceRules};

pub use crate::session::{
    Command, RoomAction, RoomEvent,
    Dispatch, Delivery, RoomRegistry,
    Phase, Player, Room,
    PlayerView, RoomSnapshot,
    ServerMessage,
};
