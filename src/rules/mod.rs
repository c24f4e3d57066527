//! Match progression rules.
//!
//! - `validator`: turn-order checks for proposed rounds
//! - `score`: score accumulation from the round list
//! - `completion`: in-progress / sudden-death / completed detection
//! - `sudden_death`: tie-break resolution
//! - `engine`: `ProgressionEngine`, the only entry point callers need
//! - `edit`: round edits that end in a full recompute

pub mod validator;
pub mod score;
pub mod completion;
pub mod sudden_death;
pub mod engine;
pub mod edit;

pub use engine::ProgressionEngine;
pub use edit::RoundPatch;
pub use validator::{legal_pairings, suggested_evader, validate_roles, validate_round, Pairing};
