//! Wire codec.
//!
//! Client traffic is JSON: one [`Command`] per inbound message and one
//! [`ServerMessage`] per outbound one. Snapshots additionally have a compact
//! bincode form for persistence and replay tooling.

use serde::{Deserialize, Serialize};

use super::command::Command;
use super::event::RoomEvent;
use super::registry::Dispatch;
use super::snapshot::RoomSnapshot;
use crate::core::{ErrorResponse, GameError, PlayerId};

/// One outbound message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage {
    Snapshot(RoomSnapshot),
    Event(RoomEvent),
    Error(ErrorResponse),
}

impl From<GameError> for ServerMessage {
    fn from(err: GameError) -> Self {
        ServerMessage::Error(err.to_response())
    }
}

/// Parse one inbound JSON message.
pub fn decode_command(text: &str) -> Result<Command, GameError> {
    serde_json::from_str(text).map_err(|e| GameError::Malformed(e.to_string()))
}

pub fn encode_message(message: &ServerMessage) -> Result<String, GameError> {
    serde_json::to_string(message).map_err(|e| GameError::Malformed(e.to_string()))
}

pub fn encode_snapshot(snapshot: &RoomSnapshot) -> Result<Vec<u8>, GameError> {
    bincode::serialize(snapshot).map_err(|e| GameError::Malformed(e.to_string()))
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<RoomSnapshot, GameError> {
    bincode::deserialize(bytes).map_err(|e| GameError::Malformed(e.to_string()))
}

/// Fan a dispatch out into per-recipient messages: every event, then that
/// recipient's snapshot.
#[must_use]
pub fn outbound(dispatch: &Dispatch) -> Vec<(PlayerId, ServerMessage)> {
    dispatch
        .deliveries
        .iter()
        .flat_map(|delivery| {
            dispatch
                .events
                .iter()
                .cloned()
                .map(ServerMessage::Event)
                .chain(std::iter::once(ServerMessage::Snapshot(delivery.snapshot.clone())))
                .map(move |message| (delivery.recipient, message))
        })
        .collect()
}
