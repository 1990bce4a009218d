//! Playing cards and their rule classes.
//!
//! ## Card
//!
//! An immutable `(rank, suit)` value. The deck holds two copies of each of
//! the 52 identities; the board shows each non-jack identity twice.
//!
//! ## CardClass
//!
//! Jacks are split by suit colour:
//! - Two-eyed jacks (hearts, diamonds) place a chip on any empty cell.
//! - One-eyed jacks (spades, clubs) remove an opposing unlocked chip.
//! - Every other card is positional: it may only be played on one of its
//!   two bound board cells.

use serde::{Deserialize, Serialize};

/// Card rank, ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All thirteen ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Short label used on the board ("A", "2".."10", "J", "Q", "K").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Red suits carry the two-eyed jacks.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// How a card interacts with the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    /// Two-eyed jack: place on any empty non-corner cell.
    WildPlacer,
    /// One-eyed jack: remove an opposing, unlocked chip.
    Remover,
    /// Any non-jack: place on one of the card's two bound cells.
    Positional,
}

/// A playing card. Identity is `(rank, suit)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Number of distinct identities in a standard set.
    pub const DISTINCT: usize = 52;

    /// Number of distinct non-jack identities.
    pub const POSITIONAL: usize = 48;

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Classify this card. The suit-to-class mapping is fixed.
    #[must_use]
    pub const fn class(self) -> CardClass {
        match (self.rank, self.suit.is_red()) {
            (Rank::Jack, true) => CardClass::WildPlacer,
            (Rank::Jack, false) => CardClass::Remover,
            _ => CardClass::Positional,
        }
    }

    #[must_use]
    pub const fn is_positional(self) -> bool {
        matches!(self.class(), CardClass::Positional)
    }

    /// Iterate the 52 distinct identities, suit-major.
    pub fn standard_set() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
    }

    /// Iterate the 48 positional identities (everything but jacks).
    pub fn positional_set() -> impl Iterator<Item = Card> {
        Self::standard_set().filter(|c| c.is_positional())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
