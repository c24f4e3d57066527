//! Random match playouts.
//!
//! Each step picks a uniformly random legal pairing and a random outcome,
//! then goes through `propose_round` like any other caller. Matches always
//! finish: the last sudden-death round resolves them.

use tracing::trace;

use super::rng::SimRng;
use crate::core::{Match, RoundCandidate};
use crate::error::MatchError;
use crate::rules::{legal_pairings, ProgressionEngine};

/// Default chance that an evader escapes.
pub const DEFAULT_EVASION_PROBABILITY: f64 = 0.5;

/// Plays random legal rounds.
#[derive(Clone, Debug)]
pub struct MatchSimulator {
    engine: ProgressionEngine,
    evasion_probability: f64,
}

impl Default for MatchSimulator {
    fn default() -> Self {
        Self::new(ProgressionEngine::default())
    }
}

impl MatchSimulator {
    #[must_use]
    pub fn new(engine: ProgressionEngine) -> Self {
        Self {
            engine,
            evasion_probability: DEFAULT_EVASION_PROBABILITY,
        }
    }

    /// Set the chance that an evader escapes.
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `[0, 1]`.
    #[must_use]
    pub fn with_evasion_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Evasion probability must be within [0, 1]"
        );
        self.evasion_probability = probability;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    #[must_use]
    pub fn evasion_probability(&self) -> f64 {
        self.evasion_probability
    }

    /// A random round the validator accepts. `None` once completed.
    pub fn next_candidate(&self, m: &Match, rng: &mut SimRng) -> Option<RoundCandidate> {
        let pairings = legal_pairings(m);
        let pairing = rng.choose(&pairings)?;

        let candidate = if rng.gen_bool(self.evasion_probability) {
            RoundCandidate::evaded(pairing.chaser, pairing.evader)
        } else {
            let duration = self.engine.rules_for(m).round_duration_secs;
            RoundCandidate::tagged(pairing.chaser, pairing.evader, rng.gen_range_f64(0.0, duration))
        };
        Some(candidate)
    }

    /// Play up to `limit` rounds, stopping early on completion.
    pub fn play_rounds(&self, m: &Match, limit: usize, rng: &mut SimRng) -> Result<Match, MatchError> {
        let mut current = m.clone();
        for _ in 0..limit {
            let Some(candidate) = self.next_candidate(&current, rng) else {
                break;
            };
            current = self.engine.propose_round(&current, candidate)?;
        }
        trace!(rounds = current.round_count(), status = ?current.status(), "playout stopped");
        Ok(current)
    }

    /// Play until the match completes.
    pub fn play(&self, m: &Match, rng: &mut SimRng) -> Result<Match, MatchError> {
        let limit = self.engine.rules_for(m).sudden_death_end();
        self.play_rounds(m, limit.saturating_sub(m.round_count()), rng)
    }
}
