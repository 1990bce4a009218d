//! Notifications broadcast alongside room snapshots.

use serde::{Deserialize, Serialize};

use crate::board::Sequence;
use crate::core::{Card, Color, Coord, PlayerId};
use crate::rules::PlayAction;

/// Something that happened in a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RoomEvent {
    RoomCreated {
        room_code: String,
        host: PlayerId,
    },
    PlayerJoined {
        player: PlayerId,
        display_name: String,
    },
    PlayerLeft {
        player: PlayerId,
    },
    HostTransferred {
        from: PlayerId,
        to: PlayerId,
    },
    GameStarted {
        first_player: PlayerId,
    },
    MovePlayed {
        player: PlayerId,
        card: Card,
        target: Coord,
        action: PlayAction,
    },
    SequenceRecorded {
        sequence: Sequence,
    },
    GameOver {
        winner: Option<Color>,
        winner_names: Vec<String>,
    },
    RoomClosed {
        room_code: String,
    },
}
