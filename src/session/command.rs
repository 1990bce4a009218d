//! Intents received from participants.
//!
//! `Command` is the transport-facing enum; its JSON form uses the intent
//! names clients send (`createRoom`, `submitMove`, ...). Room-scoped
//! commands are narrowed to a [`RoomAction`] before they reach a room.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, TeamColor};
use crate::rules::Move;

/// A named intent with its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    CreateRoom {
        display_name: String,
    },
    JoinRoom {
        room_code: String,
        display_name: String,
    },
    SetTeam {
        room_code: String,
        team: Option<TeamColor>,
    },
    ToggleReady {
        room_code: String,
    },
    StartGame {
        room_code: String,
    },
    SubmitMove {
        room_code: String,
        hand_index: usize,
        #[serde(default)]
        target_cell: Option<Coord>,
    },
    LeaveRoom {
        room_code: String,
    },
}

impl Command {
    /// Intent name as sent on the wire.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateRoom { .. } => "createRoom",
            Command::JoinRoom { .. } => "joinRoom",
            Command::SetTeam { .. } => "setTeam",
            Command::ToggleReady { .. } => "toggleReady",
            Command::StartGame { .. } => "startGame",
            Command::SubmitMove { .. } => "submitMove",
            Command::LeaveRoom { .. } => "leaveRoom",
        }
    }

    /// Target room, if the intent addresses an existing one.
    #[must_use]
    pub fn room_code(&self) -> Option<&str> {
        match self {
            Command::CreateRoom { .. } => None,
            Command::JoinRoom { room_code, .. }
            | Command::SetTeam { room_code, .. }
            | Command::ToggleReady { room_code }
            | Command::StartGame { room_code }
            | Command::SubmitMove { room_code, .. }
            | Command::LeaveRoom { room_code } => Some(room_code.as_str()),
        }
    }

    /// Narrow to an in-room action. `None` for intents that change room
    /// membership.
    #[must_use]
    pub fn room_action(&self) -> Option<RoomAction> {
        match *self {
            Command::SetTeam { team, .. } => Some(RoomAction::SetTeam(team)),
            Command::ToggleReady { .. } => Some(RoomAction::ToggleReady),
            Command::StartGame { .. } => Some(RoomAction::StartGame),
            Command::SubmitMove {
                hand_index,
                target_cell,
                ..
            } => Some(RoomAction::SubmitMove(Move {
                hand_index,
                target: target_cell,
            })),
            Command::CreateRoom { .. } | Command::JoinRoom { .. } | Command::LeaveRoom { .. } => None,
        }
    }
}

/// An action applied to a single room by one of its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomAction {
    SetTeam(Option<TeamColor>),
    ToggleReady,
    StartGame,
    SubmitMove(Move),
}
