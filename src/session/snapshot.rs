//! Room-state snapshots sent to members.
//!
//! A snapshot is a full copy of the observable room: roster, board, turn,
//! recorded sequences, result and layout. Hands are filtered per recipient
//! according to [`HandVisibility`].

use serde::{Deserialize, Serialize};

use super::room::{Phase, Room};
use crate::board::{Board, Sequence};
use crate::cards::LayoutMap;
use crate::core::{Card, Color, HandVisibility, PlayerId, TeamColor};

/// One roster entry as seen by a recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub display_name: String,
    pub team: Option<TeamColor>,
    pub color: Color,
    pub ready: bool,
    pub is_host: bool,
    /// `None` when the recipient may not see this hand.
    pub hand: Option<Vec<Card>>,
    pub hand_size: usize,
}

/// Full observable room state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_code: String,
    pub host: PlayerId,
    pub players: Vec<PlayerView>,
    pub board: Board,
    pub turn_index: usize,
    pub sequences: Vec<Sequence>,
    pub winner: Option<Color>,
    pub phase: Phase,
    pub layout: LayoutMap,
    pub deck_remaining: usize,
}

impl RoomSnapshot {
    /// Build the snapshot `viewer` is allowed to see.
    #[must_use]
    pub fn for_viewer(room: &Room, viewer: PlayerId) -> Self {
        let visibility = room.rules().hand_visibility;
        let players = room
            .players()
            .iter()
            .map(|p| {
                let visible = match visibility {
                    HandVisibility::All => true,
                    HandVisibility::OwnerOnly => p.id == viewer,
                };
                PlayerView {
                    id: p.id,
                    display_name: p.display_name.clone(),
                    team: p.team,
                    color: p.color(),
                    ready: p.ready,
                    is_host: p.id == room.host(),
                    hand: visible.then(|| p.hand.to_vec()),
                    hand_size: p.hand.len(),
                }
            })
            .collect();

        let game = room.game();
        Self {
            room_code: room.code().to_string(),
            host: room.host(),
            players,
            board: game.board.clone(),
            turn_index: room.turn_index(),
            sequences: game.sequences.iter().cloned().collect(),
            winner: game.winner(),
            phase: room.phase(),
            layout: room.layout().clone(),
            deck_remaining: game.deck.draw_len(),
        }
    }

    /// The player whose turn it is, if a game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::InProgress => self.players.get(self.turn_index).map(|p| p.id),
            _ => None,
        }
    }

    /// Roster entry for `player`.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == player)
    }
}
