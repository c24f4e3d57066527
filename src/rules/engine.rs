//! Match progression engine.
//!
//! The only entry point external callers use. Two operations:
//! - `propose_round`: validate, score, append, re-evaluate status
//! - `recompute`: rebuild scores and status from the round list
//!
//! Both are pure: the input match is never modified and the returned match
//! is a new value sharing round storage with the input.

use im::Vector;
use tracing::{debug, info};

use super::completion;
use super::score;
use super::validator::validate_round;
use crate::core::{
    EngineConfig, Match, MatchKind, MatchRules, MatchStatus, Round, RoundCandidate, Side, SideMap,
};
use crate::error::MatchError;

/// Deterministic match progression engine.
///
/// ## Example
///
/// ```
/// use chase_tag::core::{Match, Player, PlayerId, RoundCandidate};
/// use chase_tag::rules::ProgressionEngine;
///
/// let ann = Player::new(PlayerId::new(1), "Ann");
/// let bo = Player::new(PlayerId::new(2), "Bo");
/// let engine = ProgressionEngine::default();
///
/// let m = Match::one_v_one(ann, bo).unwrap();
/// let m = engine
///     .propose_round(&m, RoundCandidate::evaded(PlayerId::new(2), PlayerId::new(1)))
///     .unwrap();
///
/// assert_eq!(m.team1_score(), 1);
/// assert!(!m.is_completed());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProgressionEngine {
    config: EngineConfig,
}

impl ProgressionEngine {
    /// Create an engine with custom rules.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rules that apply to a match.
    #[must_use]
    pub fn rules_for(&self, m: &Match) -> &MatchRules {
        self.config.rules_for(m.match_type())
    }

    /// Validate and append a round.
    ///
    /// On rejection the input match is untouched and the reason is returned.
    pub fn propose_round(&self, m: &Match, candidate: RoundCandidate) -> Result<Match, MatchError> {
        let rules = self.rules_for(m);

        if let Err(err) = validate_round(m, rules, &candidate) {
            debug!(
                match_type = %m.match_type(),
                round = m.round_count(),
                chaser = %candidate.chaser,
                evader = %candidate.evader,
                %err,
                "round rejected"
            );
            return Err(err);
        }

        let round = candidate.into_round(rules, m.video_url())?;
        let mut scores = *m.scores();
        score::apply_round(&mut scores, m.kind(), &round);

        let mut next = m.clone();
        next.rounds_mut().push_back(round);
        let status = completion::evaluate(next.kind(), rules, next.rounds(), &scores);

        debug!(
            match_type = %m.match_type(),
            round = m.round_count(),
            team1_score = scores[Side::One],
            team2_score = scores[Side::Two],
            "round accepted"
        );
        log_transition(&next, m.status(), status);

        next.set_progress(scores, status);
        Ok(next)
    }

    /// Rebuild scores and status from the round list.
    ///
    /// Used after any edit to `rounds`. Turn order is not re-validated, and
    /// status depends only on the final round count and scores, so a list
    /// the append path could never build still gets a status consistent
    /// with its scores. Idempotent.
    #[must_use]
    pub fn recompute(&self, m: &Match) -> Match {
        let rules = self.rules_for(m);
        let (scores, status) = replay(m.kind(), rules, m.rounds());

        let mut next = m.clone();
        log_transition(&next, m.status(), status);
        next.set_progress(scores, status);
        next
    }
}

/// Score every round, then evaluate status once on the full list.
fn replay(kind: &MatchKind, rules: &MatchRules, rounds: &Vector<Round>) -> (SideMap<u32>, MatchStatus) {
    let scores = score::recompute_scores(kind, rounds);
    let status = completion::evaluate(kind, rules, rounds, &scores);
    (scores, status)
}

fn log_transition(m: &Match, from: MatchStatus, to: MatchStatus) {
    if from == to {
        return;
    }
    match to {
        MatchStatus::SuddenDeath => info!(
            match_type = %m.match_type(),
            rounds = m.round_count(),
            "sudden death"
        ),
        MatchStatus::Completed(result) => info!(
            match_type = %m.match_type(),
            rounds = m.round_count(),
            ?result,
            "match completed"
        ),
        MatchStatus::InProgress => info!(
            match_type = %m.match_type(),
            rounds = m.round_count(),
            "match back in progress"
        ),
    }
}
