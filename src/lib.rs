//! # chase-tag
//!
//! Match progression engine for chase tag: team matches and 1v1 matches.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every engine operation takes a `Match` and
//!    returns a new one. Inputs are never modified.
//!
//! 2. **Derived Progress**: Scores and status are always a function of the
//!    round list. Any edit is followed by a full recompute.
//!
//! 3. **Configuration Over Convention**: Round caps, sudden-death length and
//!    round duration come from `MatchRules`, with presets for both formats.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Rounds live in an `im::Vector`, so
//!   match snapshots clone in O(1).
//!
//! - **Collaborators as Traits**: Player lookup and match persistence sit
//!   behind `PlayerDirectory` and `MatchStore`; in-memory implementations
//!   are provided.
//!
//! ## Modules
//!
//! - `core`: Players, sides, rounds, match state, configuration
//! - `rules`: Validation, scoring, completion, sudden death, edits
//! - `store`: Player directory, versioned match store, service surface
//! - `sim`: Seeded random playouts
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod rules;
pub mod sim;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, Match, MatchKind, MatchResult, MatchRules, MatchStatus, MatchType, Player,
    PlayerId, Round, RoundCandidate, RoundOutcome, Side, SideMap, TeamSide, VideoTimestamp,
};

pub use crate::error::{MatchError, RoleViolation};

pub use crate::rules::{legal_pairings, suggested_evader, Pairing, ProgressionEngine, RoundPatch};

pub use crate::store::{
    InMemoryMatchStore, MatchId, MatchService, MatchStore, PlayerDirectory, PlayerRegistry,
    ServiceError, StoreError, Versioned,
};

pub use crate::sim::{MatchSimulator, SimRng};
