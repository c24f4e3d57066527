//! Persistence collaborators and the service surface built on them.
//!
//! - `registry`: player resolution
//! - `matches`: versioned match snapshots
//! - `service`: load, engine, save per operation

pub mod registry;
pub mod matches;
pub mod service;

pub use registry::{PlayerDirectory, PlayerRegistry};
pub use matches::{InMemoryMatchStore, MatchId, MatchStore, StoreError, Versioned};
pub use service::{MatchService, ServiceError};
