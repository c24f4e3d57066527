//! Engine error taxonomy.
//!
//! Every failure is a locally recoverable rejection; the match passed in is
//! never modified. Callers map these to user-facing responses verbatim, so
//! the `Display` strings are part of the contract.

use serde::{Deserialize, Serialize};

/// Why a proposed chaser/evader assignment breaks turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RoleViolation {
    /// A player is not on either side of this match.
    #[error("player is not part of this match")]
    NotInMatch,
    /// 1v1 alternation broken.
    #[error("invalid player roles for this round")]
    WrongAlternation,
    /// Chaser and evader are on the same team.
    #[error("players must be from opposing teams")]
    SameTeam,
    /// The previous evader escaped and must evade again.
    #[error("must continue as evader")]
    MustContinueAsEvader,
    /// After an evasion the chaser must come from the other team.
    ///
    /// With fixed rosters, team validation reports `SameTeam` or
    /// `MustContinueAsEvader` before this check can fail.
    #[error("chaser must be from the opposing team")]
    ChaserNotOpposing,
    /// The previous chaser tagged and must evade now.
    #[error("must be evader after successful tag")]
    MustEvadeAfterTag,
}

/// Error returned by match creation and engine operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum MatchError {
    /// Chaser/evader assignment violates turn order.
    #[error("{0}")]
    InvalidRoundRole(RoleViolation),
    /// Tag made without a tag time in `[0, round duration]`.
    #[error("valid tag_time required")]
    InvalidTagTime,
    /// A player appears on both sides (or twice on one roster).
    #[error("same player cannot be on both sides")]
    SamePlayerBothSides,
    /// Completed or sudden-death matches reject edits and new rounds.
    #[error("match is locked")]
    MatchLocked,
    /// Edit/delete targets a round that does not exist.
    #[error("round index {index} out of range for {len} rounds")]
    RoundIndexOutOfRange { index: usize, len: usize },
    /// A team was created without players.
    #[error("team {team} has no players")]
    EmptyRoster { team: String },
}

impl From<RoleViolation> for MatchError {
    fn from(violation: RoleViolation) -> Self {
        MatchError::InvalidRoundRole(violation)
    }
}
