//! Round representation: one chase between a chaser and an evader.
//!
//! Callers propose rounds as `RoundCandidate`s, carrying the raw
//! `tag_made`/`tag_time` pair. Once validated, a candidate becomes a
//! `Round`, whose `RoundOutcome` can no longer hold a tag without a time.

use serde::{Deserialize, Serialize};

use super::config::MatchRules;
use super::player::PlayerId;
use super::video::{round_video_url, VideoTimestamp};
use crate::error::MatchError;

/// How a chase ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The evader survived the full round.
    Evaded,
    /// The chaser tagged the evader after `time` seconds.
    Tagged { time: f64 },
}

impl RoundOutcome {
    /// Check if the chaser made the tag.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        matches!(self, RoundOutcome::Tagged { .. })
    }

    /// Tag time, present only for tags.
    #[must_use]
    pub fn tag_time(&self) -> Option<f64> {
        match self {
            RoundOutcome::Evaded => None,
            RoundOutcome::Tagged { time } => Some(*time),
        }
    }

    /// How long the evader lasted. Evasions count the full round.
    #[must_use]
    pub fn effective_time(&self, round_duration_secs: f64) -> f64 {
        match self {
            RoundOutcome::Evaded => round_duration_secs,
            RoundOutcome::Tagged { time } => *time,
        }
    }
}

/// A played round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub chaser: PlayerId,
    pub evader: PlayerId,
    pub outcome: RoundOutcome,

    /// Where the round starts in the match video.
    pub timestamp: Option<VideoTimestamp>,

    /// Base match URL plus `timestamp`, when both are known.
    pub video_url: Option<String>,
}

impl Round {
    /// Check if the chaser made the tag.
    #[must_use]
    pub fn tag_made(&self) -> bool {
        self.outcome.is_tag()
    }

    /// Tag time, present only for tags.
    #[must_use]
    pub fn tag_time(&self) -> Option<f64> {
        self.outcome.tag_time()
    }

    /// Check if the evader escaped.
    #[must_use]
    pub fn is_evasion(&self) -> bool {
        !self.outcome.is_tag()
    }

    /// Check if a player took part in this round.
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.chaser == player || self.evader == player
    }

    /// Recompute `video_url` from `timestamp` and a base URL.
    pub fn refresh_video_url(&mut self, base_url: Option<&str>) {
        self.video_url = match (base_url, self.timestamp) {
            (Some(base), Some(ts)) => Some(round_video_url(base, ts)),
            _ => None,
        };
    }
}

/// A round proposed by a caller, before validation.
///
/// ## Example
///
/// ```
/// use chase_tag::core::{PlayerId, RoundCandidate};
///
/// let escape = RoundCandidate::evaded(PlayerId::new(1), PlayerId::new(2));
/// assert!(!escape.tag_made);
///
/// let tag = RoundCandidate::tagged(PlayerId::new(2), PlayerId::new(1), 5.0);
/// assert_eq!(tag.tag_time, Some(5.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundCandidate {
    pub chaser: PlayerId,
    pub evader: PlayerId,
    pub tag_made: bool,
    pub tag_time: Option<f64>,
    pub timestamp: Option<VideoTimestamp>,
}

impl RoundCandidate {
    /// Create a candidate from raw fields.
    #[must_use]
    pub fn new(chaser: PlayerId, evader: PlayerId, tag_made: bool, tag_time: Option<f64>) -> Self {
        Self {
            chaser,
            evader,
            tag_made,
            tag_time,
            timestamp: None,
        }
    }

    /// A round where the evader escaped.
    #[must_use]
    pub fn evaded(chaser: PlayerId, evader: PlayerId) -> Self {
        Self::new(chaser, evader, false, None)
    }

    /// A round where the chaser tagged after `time` seconds.
    #[must_use]
    pub fn tagged(chaser: PlayerId, evader: PlayerId, time: f64) -> Self {
        Self::new(chaser, evader, true, Some(time))
    }

    /// Attach a video timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: VideoTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate the outcome fields against the rules.
    ///
    /// A tag time given with `tag_made = false` is dropped.
    pub fn outcome(&self, rules: &MatchRules) -> Result<RoundOutcome, MatchError> {
        if !self.tag_made {
            return Ok(RoundOutcome::Evaded);
        }
        match self.tag_time {
            Some(time) if rules.is_valid_tag_time(time) => Ok(RoundOutcome::Tagged { time }),
            _ => Err(MatchError::InvalidTagTime),
        }
    }

    /// Build the round, checking player distinctness and tag time.
    ///
    /// Turn order is not checked here.
    pub fn into_round(self, rules: &MatchRules, base_url: Option<&str>) -> Result<Round, MatchError> {
        if self.chaser == self.evader {
            return Err(MatchError::SamePlayerBothSides);
        }
        let outcome = self.outcome(rules)?;

        let mut round = Round {
            chaser: self.chaser,
            evader: self.evader,
            outcome,
            timestamp: self.timestamp,
            video_url: None,
        };
        round.refresh_video_url(base_url);
        Ok(round)
    }
}
