//! Sudden-death resolution.
//!
//! Each side evades once. A side's effective time is the full round length
//! for an escape, or the tag time otherwise. The longer time wins; equal
//! times are a draw.

use crate::core::{MatchKind, MatchResult, MatchRules, Round, Side, SideMap};

/// Effective evasion time per side over the sudden-death rounds.
///
/// Rounds are attributed to the side of their evader. A side that never
/// evaded gets zero.
#[must_use]
pub fn evasion_times<'a>(
    kind: &MatchKind,
    rules: &MatchRules,
    rounds: impl IntoIterator<Item = &'a Round>,
) -> SideMap<f64> {
    let mut times = SideMap::with_value(0.0);
    for round in rounds {
        if let Some(side) = kind.side_of(round.evader) {
            times[side] += round.outcome.effective_time(rules.round_duration_secs);
        }
    }
    times
}

/// Decide a tied match from its sudden-death rounds.
#[must_use]
pub fn resolve<'a>(
    kind: &MatchKind,
    rules: &MatchRules,
    rounds: impl IntoIterator<Item = &'a Round>,
) -> MatchResult {
    let times = evasion_times(kind, rules, rounds);
    let (one, two) = (times[Side::One], times[Side::Two]);

    if one > two {
        MatchResult::Winner(Side::One)
    } else if two > one {
        MatchResult::Winner(Side::Two)
    } else {
        MatchResult::Draw
    }
}
