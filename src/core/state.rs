//! Match state: the aggregate the engine transforms.
//!
//! ## MatchKind
//!
//! Team and 1v1 matches carry different side identities, so the match shape
//! is a sum type rather than a record with paired optional fields:
//! - `Team`: two named rosters
//! - `OneVOne`: two players
//!
//! ## Match
//!
//! Owns the ordered round list plus the derived scores and status. Rounds
//! are an `im::Vector`, so every engine operation can return a fresh `Match`
//! while sharing structure with its input. Scores and status are private and
//! only written by the engine, which always derives them from `rounds`.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{Player, PlayerId, Side, SideMap};
use super::round::Round;
use crate::error::MatchError;

/// Literal written as the winner of a drawn match.
pub const DRAW: &str = "Draw";

/// Closed match type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    #[serde(rename = "team")]
    Team,
    #[serde(rename = "1v1")]
    OneVOne,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Team => write!(f, "team"),
            MatchType::OneVOne => write!(f, "1v1"),
        }
    }
}

/// Unrecognized match type literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown match type: {0}")]
pub struct UnknownMatchType(pub String);

impl std::str::FromStr for MatchType {
    type Err = UnknownMatchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team" => Ok(MatchType::Team),
            "1v1" => Ok(MatchType::OneVOne),
            other => Err(UnknownMatchType(other.to_string())),
        }
    }
}

/// Team roster. Most teams fit inline.
pub type Roster = SmallVec<[Player; 5]>;

/// One team in a team match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSide {
    pub name: String,
    pub players: Roster,
}

impl TeamSide {
    /// Create a team from a name and its players.
    pub fn new(name: impl Into<String>, players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            name: name.into(),
            players: players.into_iter().collect(),
        }
    }

    /// Check if a player is on this team.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player)
    }
}

/// Side identities of a team match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub team1: TeamSide,
    pub team2: TeamSide,
}

/// Side identities of a 1v1 match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneVOneMatch {
    pub player1: Player,
    pub player2: Player,
}

/// Who plays the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Team(TeamMatch),
    OneVOne(OneVOneMatch),
}

impl MatchKind {
    /// The match type tag.
    #[must_use]
    pub fn match_type(&self) -> MatchType {
        match self {
            MatchKind::Team(_) => MatchType::Team,
            MatchKind::OneVOne(_) => MatchType::OneVOne,
        }
    }

    /// Which side a player belongs to.
    #[must_use]
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        match self {
            MatchKind::Team(t) => {
                if t.team1.contains(player) {
                    Some(Side::One)
                } else if t.team2.contains(player) {
                    Some(Side::Two)
                } else {
                    None
                }
            }
            MatchKind::OneVOne(m) => {
                if m.player1.id == player {
                    Some(Side::One)
                } else if m.player2.id == player {
                    Some(Side::Two)
                } else {
                    None
                }
            }
        }
    }

    /// Display name of a side: team name or player name.
    #[must_use]
    pub fn side_name(&self, side: Side) -> &str {
        match (self, side) {
            (MatchKind::Team(t), Side::One) => &t.team1.name,
            (MatchKind::Team(t), Side::Two) => &t.team2.name,
            (MatchKind::OneVOne(m), Side::One) => &m.player1.name,
            (MatchKind::OneVOne(m), Side::Two) => &m.player2.name,
        }
    }

    /// Player ids on a side.
    #[must_use]
    pub fn players(&self, side: Side) -> SmallVec<[PlayerId; 5]> {
        match (self, side) {
            (MatchKind::Team(t), Side::One) => t.team1.players.iter().map(|p| p.id).collect(),
            (MatchKind::Team(t), Side::Two) => t.team2.players.iter().map(|p| p.id).collect(),
            (MatchKind::OneVOne(m), Side::One) => SmallVec::from_slice(&[m.player1.id]),
            (MatchKind::OneVOne(m), Side::Two) => SmallVec::from_slice(&[m.player2.id]),
        }
    }
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// One side won.
    Winner(Side),
    /// Neither side won.
    Draw,
}

impl MatchResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, MatchResult::Winner(s) if *s == side)
    }
}

/// Progression state of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Regulation rounds still being played.
    #[default]
    InProgress,
    /// Regulation ended tied; tie-break rounds being played.
    SuddenDeath,
    /// Finished with a result.
    Completed(MatchResult),
}

impl MatchStatus {
    #[must_use]
    pub fn is_sudden_death(&self) -> bool {
        matches!(self, MatchStatus::SuddenDeath)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, MatchStatus::Completed(_))
    }

    /// The result, once completed.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        match self {
            MatchStatus::Completed(result) => Some(*result),
            _ => None,
        }
    }
}

/// A chase tag match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    kind: MatchKind,
    rounds: Vector<Round>,
    scores: SideMap<u32>,
    status: MatchStatus,
    video_url: Option<String>,
}

impl Match {
    fn from_kind(kind: MatchKind) -> Self {
        Self {
            kind,
            rounds: Vector::new(),
            scores: SideMap::with_default(),
            status: MatchStatus::InProgress,
            video_url: None,
        }
    }

    /// Create an empty 1v1 match.
    ///
    /// Fails with `SamePlayerBothSides` if both players are the same.
    pub fn one_v_one(player1: Player, player2: Player) -> Result<Self, MatchError> {
        if player1.id == player2.id {
            return Err(MatchError::SamePlayerBothSides);
        }
        Ok(Self::from_kind(MatchKind::OneVOne(OneVOneMatch { player1, player2 })))
    }

    /// Create an empty team match.
    ///
    /// Fails with `EmptyRoster` if a team has no players, and with
    /// `SamePlayerBothSides` if any player is listed more than once.
    pub fn team(team1: TeamSide, team2: TeamSide) -> Result<Self, MatchError> {
        for team in [&team1, &team2] {
            if team.players.is_empty() {
                return Err(MatchError::EmptyRoster {
                    team: team.name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for player in team1.players.iter().chain(team2.players.iter()) {
            if !seen.insert(player.id) {
                return Err(MatchError::SamePlayerBothSides);
            }
        }

        Ok(Self::from_kind(MatchKind::Team(TeamMatch { team1, team2 })))
    }

    /// Set the base video URL.
    #[must_use]
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    // === Identity ===

    #[must_use]
    pub fn kind(&self) -> &MatchKind {
        &self.kind
    }

    #[must_use]
    pub fn match_type(&self) -> MatchType {
        self.kind.match_type()
    }

    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    // === Rounds ===

    /// Rounds in chronological order.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    // === Derived progress ===

    #[must_use]
    pub fn scores(&self) -> &SideMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side]
    }

    /// Score of team1 / player1.
    #[must_use]
    pub fn team1_score(&self) -> u32 {
        self.scores[Side::One]
    }

    /// Score of team2 / player2.
    #[must_use]
    pub fn team2_score(&self) -> u32 {
        self.scores[Side::Two]
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn is_sudden_death(&self) -> bool {
        self.status.is_sudden_death()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Completed or in sudden death; edits are refused.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.is_completed() || self.is_sudden_death()
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.status.result()
    }

    /// Winner as written on the scoresheet: side name, or "Draw".
    ///
    /// Present iff the match is completed.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        match self.status.result()? {
            MatchResult::Winner(side) => Some(self.kind.side_name(side)),
            MatchResult::Draw => Some(DRAW),
        }
    }

    // === Engine-only mutation ===

    pub(crate) fn rounds_mut(&mut self) -> &mut Vector<Round> {
        &mut self.rounds
    }

    pub(crate) fn set_progress(&mut self, scores: SideMap<u32>, status: MatchStatus) {
        self.scores = scores;
        self.status = status;
    }

    pub(crate) fn set_video_url(&mut self, url: Option<String>) {
        self.video_url = url;
    }
}
