//! Error taxonomy for rejected intents.
//!
//! Every error rejects exactly one intent and leaves room state unchanged.
//! [`GameError::kind`] groups variants into the four caller-facing classes
//! plus `Internal` for a room whose handler faulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::Coord;

/// Coarse classification delivered to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    IllegalState,
    Forbidden,
    Invalid,
    Internal,
}

/// Errors raised while handling an intent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    // === NotFound ===
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("you are not a member of this room")]
    PlayerNotInRoom,

    // === IllegalState ===
    #[error("game already in progress")]
    GameInProgress,

    #[error("action not allowed while the room is {0}")]
    WrongPhase(&'static str),

    #[error("room is full")]
    RoomFull,

    #[error("already in room")]
    AlreadyInRoom,

    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("no chip at {0}")]
    NoTarget(Coord),

    #[error("cannot remove a chip from a completed sequence at {0}")]
    Locked(Coord),

    // === Forbidden ===
    #[error("not your turn")]
    NotYourTurn,

    #[error("only the host can do that")]
    NotHost,

    #[error("cannot remove your own chip at {0}")]
    OwnChip(Coord),

    #[error("team {0} is full")]
    TeamFull(String),

    // === Invalid ===
    #[error("no card at hand index {0}")]
    InvalidCard(usize),

    #[error("card {card} does not match cell {cell}")]
    WrongCell { card: String, cell: Coord },

    #[error("corner {0} is wild and cannot hold a chip")]
    CornerForbidden(Coord),

    #[error("cell ({row},{col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("select a board cell for this card")]
    MissingTarget,

    #[error("need at least {0} players")]
    NotEnoughPlayers(usize),

    #[error("not all players ready")]
    PlayersNotReady,

    #[error("invalid room code {0:?}")]
    InvalidRoomCode(String),

    #[error("malformed message: {0}")]
    Malformed(String),

    // === Internal ===
    #[error("room {0} was closed after an internal fault")]
    RoomFault(String),
}

impl GameError {
    /// Taxonomy class for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            RoomNotFound(_) | PlayerNotInRoom => ErrorKind::NotFound,
            GameInProgress | WrongPhase(_) | RoomFull | AlreadyInRoom | Occupied(_)
            | NoTarget(_) | Locked(_) => ErrorKind::IllegalState,
            NotYourTurn | NotHost | OwnChip(_) | TeamFull(_) => ErrorKind::Forbidden,
            InvalidCard(_) | WrongCell { .. } | CornerForbidden(_) | OutOfBounds { .. }
            | MissingTarget | NotEnoughPlayers(_) | PlayersNotReady
            | InvalidRoomCode(_) | Malformed(_) => ErrorKind::Invalid,
            RoomFault(_) => ErrorKind::Internal,
        }
    }

    /// Private reply for the participant whose intent was rejected.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Serializable `{kind, message}` reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<GameError> for ErrorResponse {
    fn from(err: GameError) -> Self {
        err.to_response()
    }
}
