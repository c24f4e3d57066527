//! Turn-order validation.
//!
//! ## 1v1
//!
//! The first round's evader is free. After that, even-indexed rounds repeat
//! round 0's chaser/evader pair and odd-indexed rounds swap it. Sudden death
//! lifts the alternation; any order of the two players is accepted.
//!
//! ## Team
//!
//! Membership is checked first, then that chaser and evader come from
//! opposite teams. A same-team pairing is always reported as `SameTeam`,
//! whatever the previous round was. Outside sudden death the continuation
//! rule follows:
//! - after an evasion, the same evader continues against a chaser from the
//!   other team
//! - after a tag, the tagging chaser becomes the evader

use crate::core::{Match, MatchKind, MatchRules, OneVOneMatch, PlayerId, Round, RoundCandidate, Side};
use crate::error::{MatchError, RoleViolation};

/// A chaser/evader assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub chaser: PlayerId,
    pub evader: PlayerId,
}

/// Check a proposed round before it is appended.
///
/// Checks, in order: match not completed, distinct players, turn order,
/// tag time.
pub fn validate_round(
    m: &Match,
    rules: &MatchRules,
    candidate: &RoundCandidate,
) -> Result<(), MatchError> {
    if m.is_completed() {
        return Err(MatchError::MatchLocked);
    }
    if candidate.chaser == candidate.evader {
        return Err(MatchError::SamePlayerBothSides);
    }
    validate_roles(m, candidate.chaser, candidate.evader)?;
    candidate.outcome(rules)?;
    Ok(())
}

/// Check a chaser/evader assignment against the round history.
pub fn validate_roles(m: &Match, chaser: PlayerId, evader: PlayerId) -> Result<(), RoleViolation> {
    match m.kind() {
        MatchKind::OneVOne(players) => validate_one_v_one(m, players, chaser, evader),
        MatchKind::Team(_) => validate_team(m, chaser, evader),
    }
}

fn validate_one_v_one(
    m: &Match,
    players: &OneVOneMatch,
    chaser: PlayerId,
    evader: PlayerId,
) -> Result<(), RoleViolation> {
    let known = |p: PlayerId| p == players.player1.id || p == players.player2.id;
    if !known(chaser) || !known(evader) {
        return Err(RoleViolation::NotInMatch);
    }
    if m.is_sudden_death() {
        return Ok(());
    }

    match m.rounds().front() {
        None => Ok(()),
        Some(first) => {
            let expected = alternation_pairing(first, m.round_count());
            if expected == (Pairing { chaser, evader }) {
                Ok(())
            } else {
                Err(RoleViolation::WrongAlternation)
            }
        }
    }
}

fn validate_team(m: &Match, chaser: PlayerId, evader: PlayerId) -> Result<(), RoleViolation> {
    let kind = m.kind();
    let evader_side = kind.side_of(evader).ok_or(RoleViolation::NotInMatch)?;
    let chaser_side = kind.side_of(chaser).ok_or(RoleViolation::NotInMatch)?;
    if chaser_side == evader_side {
        return Err(RoleViolation::SameTeam);
    }
    if m.is_sudden_death() {
        return Ok(());
    }

    match m.last_round() {
        None => Ok(()),
        Some(prev) if prev.is_evasion() => {
            if evader != prev.evader {
                return Err(RoleViolation::MustContinueAsEvader);
            }
            if kind.side_of(prev.evader) == Some(chaser_side) {
                return Err(RoleViolation::ChaserNotOpposing);
            }
            Ok(())
        }
        Some(prev) if evader != prev.chaser => Err(RoleViolation::MustEvadeAfterTag),
        Some(_) => Ok(()),
    }
}

/// The 1v1 pairing for round `index`, fixed by round 0.
#[must_use]
pub fn alternation_pairing(first: &Round, index: usize) -> Pairing {
    if index % 2 == 0 {
        Pairing {
            chaser: first.chaser,
            evader: first.evader,
        }
    } else {
        Pairing {
            chaser: first.evader,
            evader: first.chaser,
        }
    }
}

/// Team continuation: who evades after `last`.
///
/// An evader who escaped keeps evading; a chaser who tagged evades next.
#[must_use]
pub fn continuing_evader(last: &Round) -> PlayerId {
    if last.is_evasion() {
        last.evader
    } else {
        last.chaser
    }
}

/// The evader the rules force for the next round, if any.
///
/// `None` for an empty match, during sudden death, or once completed.
#[must_use]
pub fn suggested_evader(m: &Match) -> Option<PlayerId> {
    if m.is_completed() || m.is_sudden_death() {
        return None;
    }
    match m.kind() {
        MatchKind::OneVOne(_) => {
            let first = m.rounds().front()?;
            Some(alternation_pairing(first, m.round_count()).evader)
        }
        MatchKind::Team(_) => m.last_round().map(continuing_evader),
    }
}

/// Every assignment the validator would accept for the next round.
///
/// Empty once the match is completed.
#[must_use]
pub fn legal_pairings(m: &Match) -> Vec<Pairing> {
    if m.is_completed() {
        return Vec::new();
    }

    let kind = m.kind();
    let mut pairings = Vec::new();
    for side in Side::ALL {
        for chaser in kind.players(side) {
            for evader in kind.players(side.opponent()) {
                if validate_roles(m, chaser, evader).is_ok() {
                    pairings.push(Pairing { chaser, evader });
                }
            }
        }
    }
    pairings
}
