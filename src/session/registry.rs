//! Room registry: code allocation, routing and fault isolation.
//!
//! The registry owns every live room. Each command is routed to one room
//! and handled to completion before the next one is looked at. A handler
//! that panics takes only its own room down: the room is dropped, the
//! sender gets an `Internal` error, and every other room carries on.

use std::panic::{self, AssertUnwindSafe};

use rustc_hash::FxHashMap;
use tracing::{error, info, warn};

use super::command::{Command, RoomAction};
use super::event::RoomEvent;
use super::room::Room;
use super::snapshot::RoomSnapshot;
use crate::core::{GameError, GameRng, PlayerId, RegistryConfig};

const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longest room code accepted from a client.
const MAX_ROOM_CODE_LEN: usize = 16;

/// A snapshot addressed to one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: PlayerId,
    pub snapshot: RoomSnapshot,
}

/// Everything a handled command produced for one room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub room_code: String,
    pub events: Vec<RoomEvent>,
    /// One snapshot per remaining member. Empty once the room closed.
    pub deliveries: Vec<Delivery>,
}

impl Dispatch {
    /// The snapshot sent to `player`, if any.
    #[must_use]
    pub fn snapshot_for(&self, player: PlayerId) -> Option<&RoomSnapshot> {
        self.deliveries
            .iter()
            .find(|d| d.recipient == player)
            .map(|d| &d.snapshot)
    }
}

/// All live rooms, keyed by code.
#[derive(Debug)]
pub struct RoomRegistry {
    config: RegistryConfig,
    rooms: FxHashMap<String, Room>,
    rng: GameRng,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl RoomRegistry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            config,
            rooms: FxHashMap::default(),
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[must_use]
    pub fn room(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Codes of every room `player` belongs to, sorted.
    #[must_use]
    pub fn rooms_of(&self, player: PlayerId) -> Vec<String> {
        let mut codes: Vec<String> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.contains(player))
            .map(|(code, _)| code.clone())
            .collect();
        codes.sort();
        codes
    }

    /// Handle one command from `sender`.
    ///
    /// On success every remaining member of the addressed room gets a fresh
    /// snapshot. On failure nothing changed and only the sender should be
    /// told.
    pub fn handle(&mut self, sender: PlayerId, command: Command) -> Result<Dispatch, GameError> {
        let name = command.name();
        let result = match command {
            Command::CreateRoom { display_name } => Ok(self.create_room(sender, &display_name)),
            Command::JoinRoom {
                room_code,
                display_name,
            } => self.join_room(sender, &room_code, &display_name),
            Command::LeaveRoom { room_code } => self.leave_room(sender, &room_code),
            other => match (other.room_code(), other.room_action()) {
                (Some(code), Some(action)) => self.act(sender, code, action),
                _ => Err(GameError::Malformed(format!("{name} cannot be routed"))),
            },
        };

        if let Err(err) = &result {
            warn!(player = %sender, command = name, kind = ?err.kind(), %err, "intent rejected");
        }
        result
    }

    /// Open a room with `host` as its only member.
    pub fn create_room(&mut self, host: PlayerId, display_name: &str) -> Dispatch {
        let code = self.generate_unique_room_code();
        let room = Room::new(
            code.clone(),
            host,
            display_name,
            self.config.rules.clone(),
            self.rng.fork(),
        );
        self.rooms.insert(code.clone(), room);
        info!(room = %code, host = %host, rooms = self.rooms.len(), "room created");

        let events = vec![RoomEvent::RoomCreated {
            room_code: code.clone(),
            host,
        }];
        self.dispatch(&code, events)
    }

    pub fn join_room(&mut self, player: PlayerId, code: &str, display_name: &str) -> Result<Dispatch, GameError> {
        let code = normalize_room_code(code)?;
        let events = self.update(&code, |room| room.join(player, display_name))?;
        Ok(self.dispatch(&code, events))
    }

    /// Remove `player` from a room, closing it when the last member goes.
    pub fn leave_room(&mut self, player: PlayerId, code: &str) -> Result<Dispatch, GameError> {
        let code = normalize_room_code(code)?;
        let departure = self.update(&code, |room| room.leave(player))?;

        let mut events = departure.events;
        if departure.empty {
            self.rooms.remove(&code);
            info!(room = %code, rooms = self.rooms.len(), "room closed");
            events.push(RoomEvent::RoomClosed { room_code: code.clone() });
        }
        Ok(self.dispatch(&code, events))
    }

    /// Treat a dropped connection as leaving every room it was in.
    pub fn disconnect(&mut self, player: PlayerId) -> Vec<Dispatch> {
        let codes = self.rooms_of(player);
        info!(player = %player, rooms = codes.len(), "player disconnected");
        codes
            .into_iter()
            .filter_map(|code| self.leave_room(player, &code).ok())
            .collect()
    }

    fn act(&mut self, player: PlayerId, code: &str, action: RoomAction) -> Result<Dispatch, GameError> {
        let code = normalize_room_code(code)?;
        let events = self.update(&code, |room| room.apply(player, action))?;
        Ok(self.dispatch(&code, events))
    }

    /// Run `f` against one room, isolating panics.
    ///
    /// A panicking handler closes the room and yields
    /// [`GameError::RoomFault`].
    pub fn update<T>(&mut self, code: &str, f: impl FnOnce(&mut Room) -> Result<T, GameError>) -> Result<T, GameError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| GameError::RoomNotFound(code.to_string()))?;

        match panic::catch_unwind(AssertUnwindSafe(|| f(room))) {
            Ok(result) => result,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                self.rooms.remove(code);
                error!(room = %code, %reason, rooms = self.rooms.len(), "room handler panicked, room closed");
                Err(GameError::RoomFault(code.to_string()))
            }
        }
    }

    fn dispatch(&self, code: &str, events: Vec<RoomEvent>) -> Dispatch {
        let deliveries = self
            .rooms
            .get(code)
            .map(|room| {
                room.players()
                    .iter()
                    .map(|p| Delivery {
                        recipient: p.id,
                        snapshot: room.snapshot_for(p.id),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Dispatch {
            room_code: code.to_string(),
            events,
            deliveries,
        }
    }

    fn generate_unique_room_code(&mut self) -> String {
        let len = self.config.room_code_len.max(1);
        loop {
            let code: String = (0..len)
                .map(|_| ROOM_CODE_CHARSET[self.rng.gen_range_usize(0..ROOM_CODE_CHARSET.len())] as char)
                .collect();
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}

/// Canonical form of a client-supplied room code: trimmed and uppercased.
pub fn normalize_room_code(raw: &str) -> Result<String, GameError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() || code.len() > MAX_ROOM_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GameError::InvalidRoomCode(raw.to_string()));
    }
    Ok(code)
}
