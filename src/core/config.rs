//! Engine configuration.
//!
//! - `RulesConfig`: house-rule flags and table sizes for one ruleset
//! - `RegistryConfig`: rules plus room-code and seeding options
//!
//! Both use builder-style `with_*` methods over a sensible `Default`.

use serde::{Deserialize, Serialize};

/// Who sees a player's hand in room snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandVisibility {
    /// Every member receives every hand.
    All,
    /// Each member receives only their own hand; other hands are hidden.
    #[default]
    OwnerOnly,
}

/// Cards dealt per player, indexed by player count (0 and 1 unused).
const HAND_SIZES: [usize; 13] = [0, 0, 7, 6, 6, 5, 5, 4, 4, 4, 3, 3, 3];

/// Ruleset configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// A single run of `long_run_length` or more counts as two sequence-points.
    pub long_run_double_credit: bool,

    /// The host counts as ready without toggling.
    pub host_always_ready: bool,

    /// Hand visibility in snapshots.
    pub hand_visibility: HandVisibility,

    /// Maximum players sharing one team colour.
    pub max_team_size: usize,

    /// Minimum players to start a game.
    pub min_players: usize,

    /// Maximum players in a room.
    pub max_players: usize,

    /// Cells needed for a sequence.
    pub sequence_length: usize,

    /// Run length that earns double credit.
    pub long_run_length: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            long_run_double_credit: true,
            host_always_ready: false,
            hand_visibility: HandVisibility::OwnerOnly,
            max_team_size: 2,
            min_players: 2,
            max_players: 12,
            sequence_length: 5,
            long_run_length: 9,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_long_run_double_credit(mut self, enabled: bool) -> Self {
        self.long_run_double_credit = enabled;
        self
    }

    #[must_use]
    pub fn with_host_always_ready(mut self, enabled: bool) -> Self {
        self.host_always_ready = enabled;
        self
    }

    #[must_use]
    pub fn with_hand_visibility(mut self, visibility: HandVisibility) -> Self {
        self.hand_visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_max_team_size(mut self, size: usize) -> Self {
        self.max_team_size = size;
        self
    }

    /// Cards dealt to each player for a given table size.
    ///
    /// Counts outside the supported range fall back to the nearest entry.
    #[must_use]
    pub fn hand_size(&self, player_count: usize) -> usize {
        HAND_SIZES[player_count.clamp(2, HAND_SIZES.len() - 1)]
    }

    /// Sequence-points a colour needs to win.
    #[must_use]
    pub fn win_threshold(&self, player_count: usize) -> u32 {
        match player_count {
            0..=3 => 2,
            _ => 1,
        }
    }
}

/// Registry-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub rules: RulesConfig,

    /// Length of generated room codes.
    pub room_code_len: usize,

    /// Fixed seed for reproducible rooms. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            room_code_len: 4,
            seed: None,
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_room_code_len(mut self, len: usize) -> Self {
        self.room_code_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_size_table() {
        let rules = RulesConfig::default();
        assert_eq!(rules.hand_size(2), 7);
        assert_eq!(rules.hand_size(3), 6);
        assert_eq!(rules.hand_size(4), 6);
        assert_eq!(rules.hand_size(6), 5);
        assert_eq!(rules.hand_size(8), 4);
        assert_eq!(rules.hand_size(9), 4);
        assert_eq!(rules.hand_size(12), 3);
    }

    #[test]
    fn test_win_threshold_table() {
        let rules = RulesConfig::default();
        assert_eq!(rules.win_threshold(2), 2);
        assert_eq!(rules.win_threshold(3), 2);
        assert_eq!(rules.win_threshold(4), 1);
        assert_eq!(rules.win_threshold(12), 1);
    }

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert!(rules.long_run_double_credit);
        assert!(!rules.host_always_ready);
        assert_eq!(rules.hand_visibility, HandVisibility::OwnerOnly);
        assert_eq!(rules.max_team_size, 2);

        let registry = RegistryConfig::default().with_seed(7);
        assert_eq!(registry.seed, Some(7));
        assert_eq!(registry.room_code_len, 4);
    }

    #[test]
    fn test_builder() {
        let rules = RulesConfig::default()
            .with_long_run_double_credit(false)
            .with_host_always_ready(true)
            .with_hand_visibility(HandVisibility::All);
        assert!(!rules.long_run_double_credit);
        assert!(rules.host_always_ready);
        assert_eq!(rules.hand_visibility, HandVisibility::All);
    }
}
