//! Participant identity and chip colours.
//!
//! ## PlayerId
//!
//! Opaque connection identity handed to the engine by the transport.
//! The engine never allocates these.
//!
//! ## Color
//!
//! A chip colour is either a chosen team colour or, in free-for-all play,
//! the player's own identity. Colours are resolved once per move and all
//! own/opposing checks compare resolved colours.

use serde::{Deserialize, Serialize};

/// Participant identity supplied by the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Selectable team colours.
///
/// Six colours at two players each cover a full twelve-player room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Orange,
}

impl TeamColor {
    pub const ALL: [TeamColor; 6] = [
        TeamColor::Blue,
        TeamColor::Green,
        TeamColor::Red,
        TeamColor::Yellow,
        TeamColor::Purple,
        TeamColor::Orange,
    ];
}

impl std::fmt::Display for TeamColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
            TeamColor::Red => "red",
            TeamColor::Yellow => "yellow",
            TeamColor::Purple => "purple",
            TeamColor::Orange => "orange",
        };
        f.write_str(name)
    }
}

/// Resolved chip colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Shared by every member of a team.
    Team(TeamColor),
    /// Free-for-all: the player is their own colour.
    Personal(PlayerId),
}

impl Color {
    /// Resolve the acting colour for a player.
    #[must_use]
    pub fn resolve(player: PlayerId, team: Option<TeamColor>) -> Self {
        match team {
            Some(team) => Color::Team(team),
            None => Color::Personal(player),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Team(team) => write!(f, "{team}"),
            Color::Personal(player) => write!(f, "{player}"),
        }
    }
}
