//! A single room: roster, lobby state and the running game.
//!
//! ## Lifecycle
//!
//! `Lobby → InProgress → Finished`. Starting a game (from `Lobby` or
//! `Finished`) rebuilds every game-scoped field; the layout map is created
//! with the room and kept until the room closes.
//!
//! ## Turn gate
//!
//! Only `players[turn_index]` may submit a move. Intents are handled one at
//! a time to completion, so the gate is the only guard needed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::command::RoomAction;
use super::event::RoomEvent;
use super::snapshot::RoomSnapshot;
use crate::cards::LayoutMap;
use crate::core::{Color, GameError, GameRng, PlayerId, RulesConfig, TeamColor};
use crate::rules::{first_turn, next_turn, GameResult, GameState, Hand, Move, RulesEngine, SequenceRules};

/// Longest display name kept, in characters.
const MAX_NAME_LEN: usize = 32;

/// Room phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Lobby,
    InProgress,
    Finished,
}

impl Phase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Lobby => "in the lobby",
            Phase::InProgress => "in a game",
            Phase::Finished => "finished",
        }
    }
}

/// A room member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub team: Option<TeamColor>,
    pub ready: bool,
    pub hand: Hand,
}

impl Player {
    fn new(id: PlayerId, display_name: &str) -> Self {
        Self {
            id,
            display_name: clean_name(display_name, id),
            team: None,
            ready: false,
            hand: Hand::new(),
        }
    }

    /// Chip colour this player plays with.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::resolve(self.id, self.team)
    }
}

fn clean_name(name: &str, id: PlayerId) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        format!("Player_{}", id.raw())
    } else {
        trimmed.chars().take(MAX_NAME_LEN).collect()
    }
}

/// What a departure did to the room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Departure {
    pub events: Vec<RoomEvent>,
    /// The room has no members left and should be dropped.
    pub empty: bool,
}

/// One room and everything it owns.
#[derive(Clone, Debug)]
pub struct Room {
    code: String,
    host: PlayerId,
    players: Vec<Player>,
    layout: LayoutMap,
    game: GameState,
    turn_index: usize,
    phase: Phase,
    rules: SequenceRules,
    rng: GameRng,
}

impl Room {
    /// Create a room with its host as the only member.
    #[must_use]
    pub fn new(code: String, host: PlayerId, host_name: &str, rules: RulesConfig, rng: GameRng) -> Self {
        let layout = LayoutMap::generate(&mut rng.for_context("layout"));
        Self {
            code,
            host,
            players: vec![Player::new(host, host_name)],
            layout,
            game: GameState::default(),
            turn_index: 0,
            phase: Phase::Lobby,
            rules: SequenceRules::new(rules),
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn host(&self) -> PlayerId {
        self.host
    }

    /// Members in join order, which is also turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        self.rules.config()
    }

    /// Whose turn it is, while a game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::InProgress => self.players.get(self.turn_index).map(|p| p.id),
            _ => None,
        }
    }

    /// Direct access to the game state for scenario setup and replay
    /// tooling. Bypasses every rule check.
    #[doc(hidden)]
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    /// Direct access to a member's hand. Bypasses every rule check.
    #[doc(hidden)]
    pub fn hand_mut(&mut self, id: PlayerId) -> Option<&mut Hand> {
        self.players.iter_mut().find(|p| p.id == id).map(|p| &mut p.hand)
    }

    /// Snapshot as seen by `viewer`.
    #[must_use]
    pub fn snapshot_for(&self, viewer: PlayerId) -> RoomSnapshot {
        RoomSnapshot::for_viewer(self, viewer)
    }

    /// Every legal move for `player`. Empty unless it is their turn.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        match (self.current_player(), self.player(player)) {
            (Some(current), Some(p)) if current == player => {
                self.rules.legal_moves(&self.game, &self.layout, &p.hand, p.color())
            }
            _ => Vec::new(),
        }
    }

    // === Membership ===

    /// Add a member. Allowed outside a running game while seats remain.
    pub fn join(&mut self, id: PlayerId, display_name: &str) -> Result<Vec<RoomEvent>, GameError> {
        if self.contains(id) {
            return Err(GameError::AlreadyInRoom);
        }
        if self.phase == Phase::InProgress {
            return Err(GameError::GameInProgress);
        }
        if self.players.len() >= self.rules().max_players {
            return Err(GameError::RoomFull);
        }

        let player = Player::new(id, display_name);
        info!(room = %self.code, player = %id, name = %player.display_name, "player joined");
        let event = RoomEvent::PlayerJoined {
            player: id,
            display_name: player.display_name.clone(),
        };
        self.players.push(player);
        Ok(vec![event])
    }

    /// Remove a member, transferring host and repairing the turn order.
    pub fn leave(&mut self, id: PlayerId) -> Result<Departure, GameError> {
        let seat = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::PlayerNotInRoom)?;
        let leaver = self.players.remove(seat);
        info!(room = %self.code, player = %id, "player left");

        let mut events = vec![RoomEvent::PlayerLeft { player: id }];

        if self.players.is_empty() {
            return Ok(Departure { events, empty: true });
        }

        if self.host == id {
            self.host = self.players[0].id;
            info!(room = %self.code, from = %id, to = %self.host, "host transferred");
            events.push(RoomEvent::HostTransferred { from: id, to: self.host });
        }

        if self.phase == Phase::InProgress {
            for card in leaver.hand {
                self.game.deck.discard(card);
            }
            if seat < self.turn_index {
                self.turn_index -= 1;
            } else if self.turn_index >= self.players.len() {
                self.turn_index = 0;
            }

            if self.players.len() < self.rules().min_players {
                info!(room = %self.code, "game abandoned");
                self.finish(GameResult::Abandoned, &mut events);
            }
        } else if self.turn_index >= self.players.len() {
            self.turn_index = 0;
        }

        Ok(Departure { events, empty: false })
    }

    // === Actions ===

    /// Apply an in-room action for `actor`.
    pub fn apply(&mut self, actor: PlayerId, action: RoomAction) -> Result<Vec<RoomEvent>, GameError> {
        if !self.contains(actor) {
            return Err(GameError::PlayerNotInRoom);
        }
        match action {
            RoomAction::SetTeam(team) => self.set_team(actor, team),
            RoomAction::ToggleReady => self.toggle_ready(actor),
            RoomAction::StartGame => self.start_game(actor),
            RoomAction::SubmitMove(mv) => self.submit_move(actor, mv),
        }
    }

    fn require_not_running(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::InProgress => Err(GameError::WrongPhase(self.phase.name())),
            Phase::Lobby | Phase::Finished => Ok(()),
        }
    }

    fn member_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotInRoom)
    }

    fn set_team(&mut self, actor: PlayerId, team: Option<TeamColor>) -> Result<Vec<RoomEvent>, GameError> {
        self.require_not_running()?;

        if let Some(color) = team {
            let members = self
                .players
                .iter()
                .filter(|p| p.id != actor && p.team == Some(color))
                .count();
            if members >= self.rules().max_team_size {
                return Err(GameError::TeamFull(color.to_string()));
            }
        }

        self.member_mut(actor)?.team = team;
        debug!(room = %self.code, player = %actor, team = ?team, "team set");
        Ok(Vec::new())
    }

    fn toggle_ready(&mut self, actor: PlayerId) -> Result<Vec<RoomEvent>, GameError> {
        self.require_not_running()?;
        let player = self.member_mut(actor)?;
        player.ready = !player.ready;
        let ready = player.ready;
        debug!(room = %self.code, player = %actor, ready, "ready toggled");
        Ok(Vec::new())
    }

    fn is_ready(&self, player: &Player) -> bool {
        player.ready || (self.rules().host_always_ready && player.id == self.host)
    }

    fn start_game(&mut self, actor: PlayerId) -> Result<Vec<RoomEvent>, GameError> {
        if actor != self.host {
            return Err(GameError::NotHost);
        }
        if self.phase == Phase::InProgress {
            return Err(GameError::GameInProgress);
        }
        let min = self.rules().min_players;
        if self.players.len() < min {
            return Err(GameError::NotEnoughPlayers(min));
        }
        if !self.players.iter().all(|p| self.is_ready(p)) {
            return Err(GameError::PlayersNotReady);
        }

        self.game = GameState::new(&mut self.rng);
        let hand_size = self.rules().hand_size(self.players.len());
        for player in &mut self.players {
            player.hand.clear();
            for _ in 0..hand_size {
                if let Some(card) = self.game.deck.draw(&mut self.rng) {
                    player.hand.push(card);
                }
            }
            player.ready = false;
        }
        self.turn_index = first_turn(&mut self.rng, self.players.len());
        self.phase = Phase::InProgress;

        let first_player = self.players[self.turn_index].id;
        info!(
            room = %self.code,
            players = self.players.len(),
            hand_size,
            first = %first_player,
            "game started"
        );
        Ok(vec![RoomEvent::GameStarted { first_player }])
    }

    fn submit_move(&mut self, actor: PlayerId, mv: Move) -> Result<Vec<RoomEvent>, GameError> {
        if self.phase != Phase::InProgress {
            return Err(GameError::WrongPhase(self.phase.name()));
        }
        if self.current_player() != Some(actor) {
            return Err(GameError::NotYourTurn);
        }

        let player_count = self.players.len();
        let player = &mut self.players[self.turn_index];
        let color = player.color();
        let outcome = self.rules.play(
            &mut self.game,
            &self.layout,
            &mut player.hand,
            color,
            mv,
            player_count,
            &mut self.rng,
        )?;

        let mut events = vec![RoomEvent::MovePlayed {
            player: actor,
            card: outcome.play.card,
            target: outcome.play.target,
            action: outcome.play.action,
        }];
        events.extend(
            outcome
                .new_sequences
                .into_iter()
                .map(|sequence| RoomEvent::SequenceRecorded { sequence }),
        );

        match outcome.result {
            Some(result) => self.finish(result, &mut events),
            None => self.turn_index = next_turn(self.turn_index, player_count),
        }
        Ok(events)
    }

    fn finish(&mut self, result: GameResult, events: &mut Vec<RoomEvent>) {
        self.game.result = Some(result);
        self.phase = Phase::Finished;

        let winner = result.winner();
        let winner_names = match winner {
            Some(color) => self
                .players
                .iter()
                .filter(|p| p.color() == color)
                .map(|p| p.display_name.clone())
                .collect(),
            None => Vec::new(),
        };
        info!(room = %self.code, winner = ?winner, names = ?winner_names, "game over");
        events.push(RoomEvent::GameOver { winner, winner_names });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HandVisibility;

    fn room_with(n: u64, rules: RulesConfig) -> Room {
        let mut room = Room::new("TEST".into(), PlayerId::new(1), "Host", rules, GameRng::new(42));
        for id in 2..=n {
            room.join(PlayerId::new(id), &format!("P{id}")).unwrap();
        }
        room
    }

    fn ready_all(room: &mut Room) {
        let ids: Vec<_> = room.players().iter().map(|p| p.id).collect();
        for id in ids {
            room.apply(id, RoomAction::ToggleReady).unwrap();
        }
    }

    #[test]
    fn test_new_room() {
        let room = room_with(1, RulesConfig::default());
        assert_eq!(room.phase(), Phase::Lobby);
        assert_eq!(room.host(), PlayerId::new(1));
        assert_eq!(room.players().len(), 1);
        assert_eq!(room.current_player(), None);
    }

    #[test]
    fn test_blank_name_gets_default() {
        let mut room = room_with(1, RulesConfig::default());
        room.join(PlayerId::new(9), "   ").unwrap();
        assert_eq!(room.player(PlayerId::new(9)).unwrap().display_name, "Player_9");
    }

    #[test]
    fn test_join_twice_rejected() {
        let mut room = room_with(2, RulesConfig::default());
        assert_eq!(room.join(PlayerId::new(2), "again"), Err(GameError::AlreadyInRoom));
    }

    #[test]
    fn test_room_full() {
        let mut room = room_with(12, RulesConfig::default());
        assert_eq!(room.join(PlayerId::new(13), "late"), Err(GameError::RoomFull));
    }

    #[test]
    fn test_team_capacity() {
        let mut room = room_with(3, RulesConfig::default());
        let red = Some(TeamColor::Red);
        room.apply(PlayerId::new(1), RoomAction::SetTeam(red)).unwrap();
        room.apply(PlayerId::new(2), RoomAction::SetTeam(red)).unwrap();
        assert_eq!(
            room.apply(PlayerId::new(3), RoomAction::SetTeam(red)),
            Err(GameError::TeamFull("red".into()))
        );
        // Re-selecting your own team is not counted against you.
        room.apply(PlayerId::new(2), RoomAction::SetTeam(red)).unwrap();
        room.apply(PlayerId::new(3), RoomAction::SetTeam(None)).unwrap();
    }

    #[test]
    fn test_start_requires_host_and_ready() {
        let mut room = room_with(2, RulesConfig::default());
        assert_eq!(room.apply(PlayerId::new(2), RoomAction::StartGame), Err(GameError::NotHost));
        assert_eq!(room.apply(PlayerId::new(1), RoomAction::StartGame), Err(GameError::PlayersNotReady));

        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();
        assert_eq!(room.phase(), Phase::InProgress);
    }

    #[test]
    fn test_toggle_ready_flips_flag() {
        let mut room = room_with(2, RulesConfig::default());
        let guest = PlayerId::new(2);

        let events = room.apply(guest, RoomAction::ToggleReady).unwrap();
        assert!(events.is_empty());
        assert!(room.player(guest).unwrap().ready);
        assert!(!room.player(PlayerId::new(1)).unwrap().ready);

        room.apply(guest, RoomAction::ToggleReady).unwrap();
        assert!(!room.player(guest).unwrap().ready);
        assert_eq!(room.apply(PlayerId::new(7), RoomAction::ToggleReady), Err(GameError::PlayerNotInRoom));
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut room = room_with(1, RulesConfig::default());
        ready_all(&mut room);
        assert_eq!(room.apply(PlayerId::new(1), RoomAction::StartGame), Err(GameError::NotEnoughPlayers(2)));
    }

    #[test]
    fn test_host_always_ready_flag() {
        let mut room = room_with(2, RulesConfig::default().with_host_always_ready(true));
        room.apply(PlayerId::new(2), RoomAction::ToggleReady).unwrap();
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();
        assert_eq!(room.phase(), Phase::InProgress);
    }

    #[test]
    fn test_deal_clears_ready_and_fills_hands() {
        let mut room = room_with(3, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        for p in room.players() {
            assert_eq!(p.hand.len(), 6);
            assert!(!p.ready);
        }
        assert_eq!(room.game().deck.draw_len(), 104 - 18);
    }

    #[test]
    fn test_lobby_actions_blocked_in_game() {
        let mut room = room_with(2, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        assert!(matches!(
            room.apply(PlayerId::new(1), RoomAction::ToggleReady),
            Err(GameError::WrongPhase(_))
        ));
        assert!(matches!(
            room.apply(PlayerId::new(2), RoomAction::SetTeam(Some(TeamColor::Blue))),
            Err(GameError::WrongPhase(_))
        ));
        assert_eq!(room.join(PlayerId::new(3), "late"), Err(GameError::GameInProgress));
        assert_eq!(room.apply(PlayerId::new(1), RoomAction::StartGame), Err(GameError::GameInProgress));
    }

    #[test]
    fn test_move_outside_game_rejected() {
        let mut room = room_with(2, RulesConfig::default());
        let mv = Move { hand_index: 0, target: None };
        assert!(matches!(
            room.apply(PlayerId::new(1), RoomAction::SubmitMove(mv)),
            Err(GameError::WrongPhase(_))
        ));
        assert_eq!(
            room.apply(PlayerId::new(99), RoomAction::SubmitMove(mv)),
            Err(GameError::PlayerNotInRoom)
        );
    }

    #[test]
    fn test_leave_mid_game_keeps_turn_and_cards() {
        let mut room = room_with(3, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        let current = room.current_player().unwrap();
        let leaver = room.players().iter().map(|p| p.id).find(|&id| id != current).unwrap();
        let departure = room.leave(leaver).unwrap();

        assert!(!departure.empty);
        assert_eq!(room.current_player(), Some(current));
        let in_hands: usize = room.players().iter().map(|p| p.hand.len()).sum();
        let deck = &room.game().deck;
        assert_eq!(deck.draw_len() + deck.discard_len() + in_hands, 104);
    }

    #[test]
    fn test_leave_to_one_player_abandons() {
        let mut room = room_with(2, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        let departure = room.leave(PlayerId::new(2)).unwrap();
        assert_eq!(room.phase(), Phase::Finished);
        assert_eq!(room.game().result, Some(GameResult::Abandoned));
        assert!(departure
            .events
            .iter()
            .any(|e| matches!(e, RoomEvent::GameOver { winner: None, .. })));
    }

    #[test]
    fn test_last_leave_empties_room() {
        let mut room = room_with(1, RulesConfig::default());
        assert!(room.leave(PlayerId::new(1)).unwrap().empty);
    }

    #[test]
    fn test_snapshot_hides_other_hands() {
        let mut room = room_with(2, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        let snap = room.snapshot_for(PlayerId::new(1));
        assert!(snap.player(PlayerId::new(1)).unwrap().hand.is_some());
        assert!(snap.player(PlayerId::new(2)).unwrap().hand.is_none());
        assert_eq!(snap.player(PlayerId::new(2)).unwrap().hand_size, 7);
    }

    #[test]
    fn test_snapshot_shows_all_hands_when_configured() {
        let rules = RulesConfig::default().with_hand_visibility(HandVisibility::All);
        let mut room = room_with(2, rules);
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        let snap = room.snapshot_for(PlayerId::new(1));
        assert!(snap.players.iter().all(|p| p.hand.is_some()));
    }

    #[test]
    fn test_legal_moves_only_for_current_player() {
        let mut room = room_with(2, RulesConfig::default());
        ready_all(&mut room);
        room.apply(PlayerId::new(1), RoomAction::StartGame).unwrap();

        let current = room.current_player().unwrap();
        let other = room.players().iter().map(|p| p.id).find(|&id| id != current).unwrap();
        assert!(!room.legal_moves(current).is_empty());
        assert!(room.legal_moves(other).is_empty());
    }
}
