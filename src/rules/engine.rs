//! Move validation and application.
//!
//! `RulesEngine` is the seam between the room session and the board rules:
//! - What a card may target
//! - Whether a requested move is legal
//! - How a legal move changes the board, hand and piles
//!
//! Validation never mutates. Application only runs on a validated
//! [`Play`], so a move either commits fully or is rejected untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{GameResult, GameState, Hand};
use super::win::{record_and_evaluate, Evaluation};
use crate::board::{detect, CellState, Sequence};
use crate::cards::LayoutMap;
use crate::core::{Card, CardClass, Color, Coord, GameError, GameRng, RulesConfig};

/// A move as requested by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub hand_index: usize,
    pub target: Option<Coord>,
}

impl Move {
    #[must_use]
    pub fn new(hand_index: usize, target: Coord) -> Self {
        Self {
            hand_index,
            target: Some(target),
        }
    }
}

/// What a validated move does to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayAction {
    Place,
    Remove,
}

/// A move that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Play {
    pub hand_index: usize,
    pub card: Card,
    pub target: Coord,
    pub action: PlayAction,
}

/// Result of applying a play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub play: Play,
    /// Replacement card, if either pile still had one.
    pub drawn: Option<Card>,
    /// Sequences recorded by this move, in recording order.
    pub new_sequences: Vec<Sequence>,
    /// Set when this move ended the game.
    pub result: Option<GameResult>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate`: pure; returns the first rule the move breaks
/// - `apply`: must only be called with a `Play` from `validate` on the
///   same state
/// - `legal_targets`: empty when the card has nowhere to go
pub trait RulesEngine {
    /// Ruleset configuration.
    fn config(&self) -> &RulesConfig;

    /// Check a move for `color` holding `hand`.
    fn validate(
        &self,
        game: &GameState,
        layout: &LayoutMap,
        hand: &[Card],
        color: Color,
        mv: Move,
    ) -> Result<Play, GameError>;

    /// Commit a validated play: mutate the board, cycle the card through
    /// the piles, record sequences and evaluate the win.
    fn apply(
        &self,
        game: &mut GameState,
        hand: &mut Hand,
        color: Color,
        play: Play,
        player_count: usize,
        rng: &mut GameRng,
    ) -> MoveOutcome;

    /// Every cell `card` may legally target for `color`.
    fn legal_targets(&self, game: &GameState, layout: &LayoutMap, card: Card, color: Color) -> Vec<Coord>;

    // === Convenience Methods ===

    /// Validate then apply.
    #[allow(clippy::too_many_arguments)]
    fn play(
        &self,
        game: &mut GameState,
        layout: &LayoutMap,
        hand: &mut Hand,
        color: Color,
        mv: Move,
        player_count: usize,
        rng: &mut GameRng,
    ) -> Result<MoveOutcome, GameError> {
        let play = self.validate(game, layout, hand, color, mv)?;
        Ok(self.apply(game, hand, color, play, player_count, rng))
    }

    /// Enumerate every legal move for a hand.
    fn legal_moves(&self, game: &GameState, layout: &LayoutMap, hand: &[Card], color: Color) -> Vec<Move> {
        hand.iter()
            .enumerate()
            .flat_map(|(hand_index, &card)| {
                self.legal_targets(game, layout, card, color)
                    .into_iter()
                    .map(move |target| Move::new(hand_index, target))
            })
            .collect()
    }
}

/// The standard ruleset.
#[derive(Clone, Debug, Default)]
pub struct SequenceRules {
    config: RulesConfig,
}

impl SequenceRules {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    fn check_target(
        &self,
        game: &GameState,
        layout: &LayoutMap,
        card: Card,
        color: Color,
        target: Coord,
    ) -> Result<PlayAction, GameError> {
        let cell = game.board.get(target);
        match card.class() {
            CardClass::Remover => match cell {
                CellState::Wild | CellState::Empty => Err(GameError::NoTarget(target)),
                CellState::Occupied { color: owner, .. } if owner == color => {
                    Err(GameError::OwnChip(target))
                }
                CellState::Occupied { locked: true, .. } => Err(GameError::Locked(target)),
                CellState::Occupied { .. } => Ok(PlayAction::Remove),
            },
            CardClass::WildPlacer => match cell {
                CellState::Wild => Err(GameError::CornerForbidden(target)),
                CellState::Occupied { .. } => Err(GameError::Occupied(target)),
                CellState::Empty => Ok(PlayAction::Place),
            },
            CardClass::Positional => {
                if !layout.binds(card, target) {
                    return Err(GameError::WrongCell {
                        card: card.to_string(),
                        cell: target,
                    });
                }
                match cell {
                    CellState::Empty => Ok(PlayAction::Place),
                    _ => Err(GameError::Occupied(target)),
                }
            }
        }
    }
}

impl RulesEngine for SequenceRules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn validate(
        &self,
        game: &GameState,
        layout: &LayoutMap,
        hand: &[Card],
        color: Color,
        mv: Move,
    ) -> Result<Play, GameError> {
        let card = *hand.get(mv.hand_index).ok_or(GameError::InvalidCard(mv.hand_index))?;
        let target = mv.target.ok_or(GameError::MissingTarget)?.validate()?;
        let action = self.check_target(game, layout, card, color, target)?;

        Ok(Play {
            hand_index: mv.hand_index,
            card,
            target,
            action,
        })
    }

    fn apply(
        &self,
        game: &mut GameState,
        hand: &mut Hand,
        color: Color,
        play: Play,
        player_count: usize,
        rng: &mut GameRng,
    ) -> MoveOutcome {
        let board_change = match play.action {
            PlayAction::Place => game.board.place(play.target, color),
            PlayAction::Remove => game.board.remove(play.target).map(|_| ()),
        };
        // Only reachable when `play` was validated against a different state.
        debug_assert!(board_change.is_ok(), "validated play rejected by board: {board_change:?}");
        if board_change.is_err() {
            return MoveOutcome {
                play,
                drawn: None,
                new_sequences: Vec::new(),
                result: None,
            };
        }

        hand.remove(play.hand_index);
        game.deck.discard(play.card);
        let drawn = game.deck.draw(rng);
        if let Some(card) = drawn {
            hand.push(card);
        }
        debug!(
            card = %play.card,
            target = %play.target,
            action = ?play.action,
            drawn = drawn.is_some(),
            "move applied"
        );

        let evaluation = match play.action {
            PlayAction::Place => {
                let candidates = detect(&game.board, play.target, color, &self.config);
                record_and_evaluate(game, candidates, color, &self.config, player_count)
            }
            PlayAction::Remove => Evaluation::default(),
        };

        MoveOutcome {
            play,
            drawn,
            new_sequences: evaluation.recorded,
            result: evaluation.result,
        }
    }

    fn legal_targets(&self, game: &GameState, layout: &LayoutMap, card: Card, color: Color) -> Vec<Coord> {
        match card.class() {
            CardClass::Positional => layout
                .cells_for(card)
                .into_iter()
                .flatten()
                .filter(|&cell| game.board.get(cell) == CellState::Empty)
                .collect(),
            CardClass::WildPlacer => Coord::non_corners()
                .filter(|&cell| game.board.get(cell) == CellState::Empty)
                .collect(),
            CardClass::Remover => Coord::non_corners()
                .filter(|&cell| match game.board.get(cell) {
                    CellState::Occupied { color: owner, locked } => owner != color && !locked,
                    _ => false,
                })
                .collect(),
        }
    }
}
