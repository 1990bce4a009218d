//! Deck & layout generation.
//!
//! ## Key Types
//!
//! - `Deck`: game-scoped draw and discard piles (104 cards, no jokers)
//! - `LayoutMap`: per-room binding of each positional card to two cells
//!
//! Card identities themselves live in `core::card`.

pub mod deck;
pub mod layout;

pub use deck::{new_deck, Deck, DECK_SIZE};
pub use layout::{LayoutGrid, LayoutMap};
