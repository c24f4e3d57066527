//! Score accumulation.
//!
//! A successful evasion earns the evader's side one point; tags never
//! change the score. Scores are a pure function of the round list, whether
//! built one round at a time or replayed from scratch.

use crate::core::{MatchKind, Round, Side, SideMap};

/// The side a round scores for, if any.
#[must_use]
pub fn scoring_side(kind: &MatchKind, round: &Round) -> Option<Side> {
    if round.is_evasion() {
        kind.side_of(round.evader)
    } else {
        None
    }
}

/// Add one round to running scores.
pub fn apply_round(scores: &mut SideMap<u32>, kind: &MatchKind, round: &Round) {
    if let Some(side) = scoring_side(kind, round) {
        scores[side] += 1;
    }
}

/// Recompute scores from zero over a round list.
#[must_use]
pub fn recompute_scores<'a>(kind: &MatchKind, rounds: impl IntoIterator<Item = &'a Round>) -> SideMap<u32> {
    let mut scores = SideMap::with_default();
    for round in rounds {
        apply_round(&mut scores, kind, round);
    }
    scores
}
