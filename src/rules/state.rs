//! Game-scoped state.
//!
//! Everything here is rebuilt on every game start and never carried into
//! the next game. The layout map is room-scoped and lives on the room.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, SequenceSet};
use crate::cards::Deck;
use crate::core::{Card, Color, GameRng};

/// A player's hand. Seven is the largest deal.
pub type Hand = SmallVec<[Card; 7]>;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// A colour reached its win threshold.
    Winner(Color),
    /// Too few players remained to continue.
    Abandoned,
}

impl GameResult {
    #[must_use]
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Winner(color) => Some(color),
            GameResult::Abandoned => None,
        }
    }
}

/// Board, piles and recorded sequences for one game.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub board: Board,
    pub deck: Deck,
    pub sequences: SequenceSet,
    pub result: Option<GameResult>,
}

impl GameState {
    /// Fresh state: empty board, shuffled deck, nothing recorded.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            board: Board::new(),
            deck: Deck::shuffled(rng),
            sequences: SequenceSet::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.result.and_then(GameResult::winner)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }
}
