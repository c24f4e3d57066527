//! Match rule configuration.
//!
//! The thresholds that drive the progression state machine live here as
//! named constants and per-match-type `MatchRules`:
//! - `round_cap`: regulation rounds before a tie goes to sudden death
//! - `sudden_death_rounds`: extra rounds played to break a tie
//! - `round_duration_secs`: length of one chase, also the tag time ceiling
//!
//! `EngineConfig` pairs the rules for both match types.

use serde::{Deserialize, Serialize};

use super::state::MatchType;

/// Length of one chase in seconds. A successful evasion counts as this long.
pub const ROUND_DURATION_SECS: f64 = 20.0;

/// Regulation rounds in a team match.
pub const TEAM_ROUND_CAP: usize = 16;

/// Regulation rounds in a 1v1 match.
pub const ONE_V_ONE_ROUND_CAP: usize = 4;

/// Rounds played in sudden death (one evasion per side).
pub const SUDDEN_DEATH_ROUNDS: usize = 2;

/// Rule thresholds for one match type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Regulation rounds before completion or sudden death.
    pub round_cap: usize,

    /// Rounds played in sudden death.
    pub sudden_death_rounds: usize,

    /// Round length in seconds; tag times must fall in `[0, round_duration_secs]`.
    pub round_duration_secs: f64,
}

impl MatchRules {
    /// Rules for team matches (16 rounds, 2 sudden-death rounds, 20s).
    #[must_use]
    pub const fn team() -> Self {
        Self {
            round_cap: TEAM_ROUND_CAP,
            sudden_death_rounds: SUDDEN_DEATH_ROUNDS,
            round_duration_secs: ROUND_DURATION_SECS,
        }
    }

    /// Rules for 1v1 matches (4 rounds, 2 sudden-death rounds, 20s).
    #[must_use]
    pub const fn one_v_one() -> Self {
        Self {
            round_cap: ONE_V_ONE_ROUND_CAP,
            sudden_death_rounds: SUDDEN_DEATH_ROUNDS,
            round_duration_secs: ROUND_DURATION_SECS,
        }
    }

    /// Set the regulation round cap.
    #[must_use]
    pub fn with_round_cap(mut self, cap: usize) -> Self {
        assert!(cap > 0, "Round cap must be at least 1");
        self.round_cap = cap;
        self
    }

    /// Set the number of sudden-death rounds.
    #[must_use]
    pub fn with_sudden_death_rounds(mut self, rounds: usize) -> Self {
        assert!(
            rounds > 0 && rounds % 2 == 0,
            "Sudden death needs a positive, even number of rounds"
        );
        self.sudden_death_rounds = rounds;
        self
    }

    /// Set the round duration in seconds.
    #[must_use]
    pub fn with_round_duration(mut self, secs: f64) -> Self {
        assert!(secs > 0.0, "Round duration must be positive");
        self.round_duration_secs = secs;
        self
    }

    /// Round count at which sudden death is over.
    #[must_use]
    pub const fn sudden_death_end(&self) -> usize {
        self.round_cap + self.sudden_death_rounds
    }

    /// Check that a tag time lies within the round.
    ///
    /// NaN and infinities are rejected.
    #[must_use]
    pub fn is_valid_tag_time(&self, secs: f64) -> bool {
        secs.is_finite() && (0.0..=self.round_duration_secs).contains(&secs)
    }
}

/// Rules for every match type the engine handles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub team: MatchRules,
    pub one_v_one: MatchRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            team: MatchRules::team(),
            one_v_one: MatchRules::one_v_one(),
        }
    }
}

impl EngineConfig {
    /// Replace the team rules.
    #[must_use]
    pub fn with_team_rules(mut self, rules: MatchRules) -> Self {
        self.team = rules;
        self
    }

    /// Replace the 1v1 rules.
    #[must_use]
    pub fn with_one_v_one_rules(mut self, rules: MatchRules) -> Self {
        self.one_v_one = rules;
        self
    }

    /// Rules for a match type.
    #[must_use]
    pub fn rules_for(&self, match_type: MatchType) -> &MatchRules {
        match match_type {
            MatchType::Team => &self.team,
            MatchType::OneVOne => &self.one_v_one,
        }
    }
}
