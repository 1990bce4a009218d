//! Turn order and win evaluation.
//!
//! Candidates from the detector are recorded one at a time. Each newly
//! recorded sequence locks its cells, then the acting colour's points are
//! re-tallied against the threshold for the table size. The first colour
//! to reach the threshold wins on the spot; any remaining candidates are
//! left unrecorded.

use tracing::info;

use super::state::{GameResult, GameState};
use crate::board::Sequence;
use crate::core::{Color, GameRng, RulesConfig};

/// Sequences recorded by one move and the result they produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub recorded: Vec<Sequence>,
    pub result: Option<GameResult>,
}

/// Record new candidates for `color`, lock their cells, and stop at the
/// first one that reaches the win threshold.
pub fn record_and_evaluate(
    game: &mut GameState,
    candidates: Vec<Sequence>,
    color: Color,
    rules: &RulesConfig,
    player_count: usize,
) -> Evaluation {
    let threshold = rules.win_threshold(player_count);
    let mut evaluation = Evaluation::default();

    for candidate in candidates {
        if game.sequences.contains(&candidate.cells) {
            continue;
        }
        game.board.lock(&candidate.cells);
        game.sequences.record(candidate.clone());

        let points = game.sequences.points_for(color, rules);
        info!(
            %color,
            length = candidate.length,
            points,
            threshold,
            "sequence recorded"
        );
        evaluation.recorded.push(candidate);

        if points >= threshold {
            info!(%color, points, "win threshold reached");
            let result = GameResult::Winner(color);
            game.result = Some(result);
            evaluation.result = Some(result);
            break;
        }
    }

    evaluation
}

/// Seat that moves after `current`, wrapping.
#[must_use]
pub fn next_turn(current: usize, player_count: usize) -> usize {
    if player_count == 0 {
        0
    } else {
        (current + 1) % player_count
    }
}

/// Uniformly random opening seat.
#[must_use]
pub fn first_turn(rng: &mut GameRng, player_count: usize) -> usize {
    rng.gen_range_usize(0..player_count.max(1))
}
