//! Round edits.
//!
//! Edits rewrite the round list directly and then recompute. Turn order is
//! not re-validated; edits only check that the match is open, the index
//! exists, both players belong to the match, and the tag time is valid.
//!
//! Deleting the last round is the undo path and works on any match, so it
//! can move a completed or sudden-death match back to an earlier state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::ProgressionEngine;
use crate::core::{Match, PlayerId, Round, RoundCandidate, VideoTimestamp};
use crate::error::{MatchError, RoleViolation};

/// Field changes for one round. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundPatch {
    pub chaser: Option<PlayerId>,
    pub evader: Option<PlayerId>,
    pub tag_made: Option<bool>,
    pub tag_time: Option<f64>,
    pub timestamp: Option<VideoTimestamp>,
}

impl RoundPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_roles(mut self, chaser: PlayerId, evader: PlayerId) -> Self {
        self.chaser = Some(chaser);
        self.evader = Some(evader);
        self
    }

    /// Mark the round as a tag at `time` seconds.
    #[must_use]
    pub fn tagged(mut self, time: f64) -> Self {
        self.tag_made = Some(true);
        self.tag_time = Some(time);
        self
    }

    /// Mark the round as an escape.
    #[must_use]
    pub fn evaded(mut self) -> Self {
        self.tag_made = Some(false);
        self.tag_time = None;
        self
    }

    #[must_use]
    pub fn with_tag_time(mut self, time: f64) -> Self {
        self.tag_time = Some(time);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: VideoTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Merge the patch over an existing round.
    #[must_use]
    pub fn apply_to(&self, round: &Round) -> RoundCandidate {
        RoundCandidate {
            chaser: self.chaser.unwrap_or(round.chaser),
            evader: self.evader.unwrap_or(round.evader),
            tag_made: self.tag_made.unwrap_or_else(|| round.tag_made()),
            tag_time: self.tag_time.or_else(|| round.tag_time()),
            timestamp: self.timestamp.or(round.timestamp),
        }
    }
}

impl ProgressionEngine {
    /// Patch one round and recompute.
    pub fn update_round(&self, m: &Match, index: usize, patch: &RoundPatch) -> Result<Match, MatchError> {
        ensure_open(m)?;
        let current = m.rounds().get(index).ok_or(MatchError::RoundIndexOutOfRange {
            index,
            len: m.round_count(),
        })?;

        let round = self.build_edited_round(m, patch.apply_to(current))?;
        let mut next = m.clone();
        next.rounds_mut().set(index, round);

        debug!(match_type = %m.match_type(), index, "round updated");
        Ok(self.recompute(&next))
    }

    /// Insert a round at `index` (`index == len` appends) and recompute.
    pub fn insert_round(&self, m: &Match, index: usize, candidate: RoundCandidate) -> Result<Match, MatchError> {
        ensure_open(m)?;
        if index > m.round_count() {
            return Err(MatchError::RoundIndexOutOfRange {
                index,
                len: m.round_count(),
            });
        }

        let round = self.build_edited_round(m, candidate)?;
        let mut next = m.clone();
        next.rounds_mut().insert(index, round);

        debug!(match_type = %m.match_type(), index, "round inserted");
        Ok(self.recompute(&next))
    }

    /// Remove the final round and recompute.
    pub fn delete_last_round(&self, m: &Match) -> Result<Match, MatchError> {
        let mut next = m.clone();
        if next.rounds_mut().pop_back().is_none() {
            return Err(MatchError::RoundIndexOutOfRange { index: 0, len: 0 });
        }

        debug!(match_type = %m.match_type(), remaining = next.round_count(), "last round deleted");
        Ok(self.recompute(&next))
    }

    /// Replace the match video URL and re-derive every round's URL.
    #[must_use]
    pub fn set_video_url(&self, m: &Match, url: Option<String>) -> Match {
        let mut next = m.clone();
        next.set_video_url(url);

        let base = next.video_url().map(str::to_owned);
        for round in next.rounds_mut().iter_mut() {
            round.refresh_video_url(base.as_deref());
        }
        next
    }

    fn build_edited_round(&self, m: &Match, candidate: RoundCandidate) -> Result<Round, MatchError> {
        let kind = m.kind();
        if kind.side_of(candidate.chaser).is_none() || kind.side_of(candidate.evader).is_none() {
            return Err(RoleViolation::NotInMatch.into());
        }
        candidate.into_round(self.rules_for(m), m.video_url())
    }
}

fn ensure_open(m: &Match) -> Result<(), MatchError> {
    if m.is_locked() {
        return Err(MatchError::MatchLocked);
    }
    Ok(())
}
