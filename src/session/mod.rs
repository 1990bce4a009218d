//! Room sessions.
//!
//! ## Key Types
//!
//! - `RoomRegistry`: every live room, keyed by a short uppercase code
//! - `Room`: roster, lobby flags and the running game for one room
//! - `Command` / `RoomAction`: inbound intents
//! - `RoomEvent` / `RoomSnapshot`: what members are sent back
//!
//! ## Flow
//!
//! A transport decodes a [`Command`] with [`wire::decode_command`] and hands
//! it to [`RoomRegistry::handle`]. A rejected intent yields a `GameError`
//! for the sender alone. An accepted one yields a [`Dispatch`] holding the
//! room's events and one snapshot per member, filtered for that member.

pub mod command;
pub mod event;
pub mod registry;
pub mod room;
pub mod snapshot;
pub mod wire;

pub use command::{Command, RoomAction};
pub use event::RoomEvent;
pub use registry::{normalize_room_code, Delivery, Dispatch, RoomRegistry};
pub use room::{Departure, Phase, Player, Room};
pub use snapshot::{PlayerView, RoomSnapshot};
pub use wire::{decode_command, decode_snapshot, encode_message, encode_snapshot, outbound, ServerMessage};
