//! Core match types: players, sides, rounds, match state, configuration.
//!
//! Everything here is plain data. The rules that move a match forward live
//! in `crate::rules`.

pub mod player;
pub mod config;
pub mod video;
pub mod round;
pub mod state;

pub use player::{Player, PlayerId, Side, SideMap};
pub use config::{
    EngineConfig, MatchRules, ONE_V_ONE_ROUND_CAP, ROUND_DURATION_SECS, SUDDEN_DEATH_ROUNDS,
    TEAM_ROUND_CAP,
};
pub use video::{round_video_url, VideoTimestamp};
pub use round::{Round, RoundCandidate, RoundOutcome};
pub use state::{
    Match, MatchKind, MatchResult, MatchStatus, MatchType, OneVOneMatch, Roster, TeamMatch,
    TeamSide, UnknownMatchType, DRAW,
};
