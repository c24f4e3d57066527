//! Completion detection.
//!
//! `InProgress -> SuddenDeath -> Completed`, with a direct
//! `InProgress -> Completed` edge when regulation ends untied or a side is
//! mathematically eliminated.
//!
//! ## Team early elimination
//!
//! The side evading next can still earn a point in every remaining round.
//! The other side chases next, so it can earn at most one fewer. A side whose
//! best case stays below the other side's current score has lost.
//!
//! ## 1v1 early finish
//!
//! Checked once, after the penultimate regulation round:
//! - a lead of more than one point is decisive
//! - a one-point leader who chased that round evades the final round, so
//!   the trailing player cannot score again

use im::Vector;

use super::sudden_death;
use super::validator::continuing_evader;
use crate::core::{MatchKind, MatchResult, MatchRules, MatchStatus, Round, Side, SideMap};

/// Status after the given rounds, with `scores` taken over all of them.
///
/// Only the round count, the scores, the last round and the sudden-death
/// rounds matter; earlier history is not replayed.
#[must_use]
pub fn evaluate(
    kind: &MatchKind,
    rules: &MatchRules,
    rounds: &Vector<Round>,
    scores: &SideMap<u32>,
) -> MatchStatus {
    let played = rounds.len();
    if played >= rules.sudden_death_end() {
        let tie_break = rounds
            .iter()
            .take(rules.sudden_death_end())
            .skip(rules.round_cap);
        return MatchStatus::Completed(sudden_death::resolve(kind, rules, tie_break));
    }
    if played > rules.round_cap {
        return MatchStatus::SuddenDeath;
    }
    if played == rules.round_cap {
        return match leader(scores) {
            Some(side) => MatchStatus::Completed(MatchResult::Winner(side)),
            None => MatchStatus::SuddenDeath,
        };
    }

    let early = match kind {
        MatchKind::Team(_) => team_elimination(kind, rules, rounds, played, scores),
        MatchKind::OneVOne(_) => one_v_one_early_finish(kind, rules, rounds, played, scores),
    };
    early.map_or(MatchStatus::InProgress, MatchStatus::Completed)
}

/// The side with the strictly higher score.
#[must_use]
pub fn leader(scores: &SideMap<u32>) -> Option<Side> {
    let (one, two) = (scores[Side::One], scores[Side::Two]);
    if one > two {
        Some(Side::One)
    } else if two > one {
        Some(Side::Two)
    } else {
        None
    }
}

fn team_elimination(
    kind: &MatchKind,
    rules: &MatchRules,
    rounds: &Vector<Round>,
    played: usize,
    scores: &SideMap<u32>,
) -> Option<MatchResult> {
    let last = rounds.get(played.checked_sub(1)?)?;
    let evading = kind.side_of(continuing_evader(last))?;
    let chasing = evading.opponent();

    let remaining = (rules.round_cap - played) as u32;
    let evading_best = scores[evading] + remaining;
    let chasing_best = scores[chasing] + remaining - 1;

    if evading_best < scores[chasing] {
        Some(MatchResult::Winner(chasing))
    } else if chasing_best < scores[evading] {
        Some(MatchResult::Winner(evading))
    } else {
        None
    }
}

fn one_v_one_early_finish(
    kind: &MatchKind,
    rules: &MatchRules,
    rounds: &Vector<Round>,
    played: usize,
    scores: &SideMap<u32>,
) -> Option<MatchResult> {
    if played + 1 != rules.round_cap {
        return None;
    }
    let side = leader(scores)?;
    let diff = scores[Side::One].abs_diff(scores[Side::Two]);
    if diff > 1 {
        return Some(MatchResult::Winner(side));
    }

    let last = rounds.get(played.checked_sub(1)?)?;
    if kind.side_of(last.chaser) == Some(side) {
        Some(MatchResult::Winner(side))
    } else {
        None
    }
}
