//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use sequence_engine::core::{Card, Color, Coord, PlayerId, Rank, RegistryConfig, RulesConfig, Suit};
use sequence_engine::session::{Command, RoomRegistry};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per binary. Safe to call repeatedly.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const SEED: u64 = 42;

pub fn registry(rules: RulesConfig) -> RoomRegistry {
    init_logging();
    RoomRegistry::new(RegistryConfig::default().with_rules(rules).with_seed(SEED))
}

pub fn pid(n: u64) -> PlayerId {
    PlayerId::new(n)
}

/// Room with `n` members (ids 1..=n, host 1), still in the lobby.
pub fn lobby(reg: &mut RoomRegistry, n: u64) -> String {
    let code = reg.create_room(pid(1), "P1").room_code;
    for id in 2..=n {
        reg.handle(
            pid(id),
            Command::JoinRoom {
                room_code: code.clone(),
                display_name: format!("P{id}"),
            },
        )
        .unwrap();
    }
    code
}

/// Room with `n` members and a game in progress.
pub fn started(reg: &mut RoomRegistry, n: u64) -> String {
    let code = lobby(reg, n);
    for id in 1..=n {
        reg.handle(pid(id), Command::ToggleReady { room_code: code.clone() })
            .unwrap();
    }
    reg.handle(pid(1), Command::StartGame { room_code: code.clone() })
        .unwrap();
    code
}

/// Whose turn it is in `code`.
pub fn current(reg: &RoomRegistry, code: &str) -> PlayerId {
    reg.room(code).unwrap().current_player().unwrap()
}

/// Colour `player` plays with in `code`.
pub fn color_of(reg: &RoomRegistry, code: &str, player: PlayerId) -> Color {
    reg.room(code).unwrap().player(player).unwrap().color()
}

/// Put chips of `color` on each cell, bypassing rules.
pub fn place_chips(reg: &mut RoomRegistry, code: &str, color: Color, cells: &[Coord]) {
    reg.update(code, |room| {
        for &cell in cells {
            room.game_mut().board.place(cell, color)?;
        }
        Ok(())
    })
    .unwrap();
}

/// Overwrite slot 0 of `player`'s hand with `card`.
pub fn give_card(reg: &mut RoomRegistry, code: &str, player: PlayerId, card: Card) {
    reg.update(code, |room| {
        if let Some(hand) = room.hand_mut(player) {
            hand[0] = card;
        }
        Ok(())
    })
    .unwrap();
}

pub fn wild_jack() -> Card {
    Card::new(Rank::Jack, Suit::Hearts)
}

pub fn remover_jack() -> Card {
    Card::new(Rank::Jack, Suit::Spades)
}

pub fn submit(room_code: &str, hand_index: usize, cell: Coord) -> Command {
    Command::SubmitMove {
        room_code: room_code.to_string(),
        hand_index,
        target_cell: Some(cell),
    }
}
