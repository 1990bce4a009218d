//! Core engine types: cards, coordinates, players, RNG, configuration, errors.
//!
//! Everything here is a leaf: no module in `core` depends on board, rules
//! or session state.

pub mod card;
pub mod config;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;

pub use card::{Card, CardClass, Rank, Suit};
pub use config::{HandVisibility, RegistryConfig, RulesConfig};
pub use coord::{Coord, BOARD_SIZE, CELL_COUNT, NON_CORNER_COUNT};
pub use error::{ErrorKind, ErrorResponse, GameError};
pub use player::{Color, PlayerId, TeamColor};
pub use rng::GameRng;
