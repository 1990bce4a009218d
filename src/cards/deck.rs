//! The draw pile and discard pile.
//!
//! A game uses two standard 52-card sets with no jokers. Cards are drawn
//! from the top (end) of the draw pile; when it runs dry the discard pile
//! is shuffled back in.

use tracing::debug;

use crate::core::{Card, GameRng};

/// Two standard sets.
pub const DECK_SIZE: usize = 2 * Card::DISTINCT;

/// Build a freshly shuffled 104-card sequence.
#[must_use]
pub fn new_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut cards: Vec<Card> = (0..2).flat_map(|_| Card::standard_set()).collect();
    rng.shuffle(&mut cards);
    cards
}

/// Game-scoped draw and discard piles.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl Deck {
    /// A shuffled full deck with an empty discard pile.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        Self {
            draw: new_deck(rng),
            discard: Vec::new(),
        }
    }

    /// Build from explicit piles. The last element of `draw` is drawn first.
    #[must_use]
    pub fn from_piles(draw: Vec<Card>, discard: Vec<Card>) -> Self {
        Self { draw, discard }
    }

    /// Draw one card, reshuffling the discard pile into the draw pile first
    /// if the draw pile is empty.
    ///
    /// Returns `None` only when both piles are empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw.is_empty() {
            self.reshuffle(rng);
        }
        self.draw.pop()
    }

    /// Put a played card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Move every discarded card back into the draw pile and shuffle.
    fn reshuffle(&mut self, rng: &mut GameRng) {
        if self.discard.is_empty() {
            return;
        }
        debug!(cards = self.discard.len(), "reshuffling discard pile into deck");
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Top card of the discard pile.
    #[must_use]
    pub fn last_discard(&self) -> Option<Card> {
        self.discard.last().copied()
    }
}
