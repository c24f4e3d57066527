//! Match persistence.
//!
//! Saves replace the whole match snapshot; there are no partial round
//! patches at this layer. Every stored match carries a version counter and
//! a save must name the version it was loaded at, so two writers that
//! loaded the same snapshot cannot both commit.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::Match;

/// Stored match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// A value with the version it was loaded at.
#[derive(Clone, Debug, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Persistence failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(MatchId),
    /// Another writer committed first.
    #[error("version conflict: expected {expected}, found {found}")]
    VersionConflict { expected: u64, found: u64 },
    #[error("snapshot codec error: {0}")]
    Codec(String),
}

/// Match persistence collaborator.
pub trait MatchStore {
    /// Store a new match. Its version starts at 1.
    fn insert(&mut self, m: &Match) -> Result<MatchId, StoreError>;

    /// Load the latest snapshot.
    fn load(&self, id: MatchId) -> Result<Versioned<Match>, StoreError>;

    /// Replace the snapshot if it is still at `expected_version`.
    ///
    /// Returns the new version.
    fn save(&mut self, id: MatchId, expected_version: u64, m: &Match) -> Result<u64, StoreError>;

    /// Remove a match.
    fn delete(&mut self, id: MatchId) -> Result<(), StoreError>;
}

#[derive(Clone, Debug)]
struct Entry {
    version: u64,
    snapshot: Vec<u8>,
}

/// In-memory store holding `bincode` snapshots.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMatchStore {
    entries: FxHashMap<MatchId, Entry>,
    next_id: u64,
}

impl InMemoryMatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all stored matches, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

fn encode(m: &Match) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(m).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Match, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}

impl MatchStore for InMemoryMatchStore {
    fn insert(&mut self, m: &Match) -> Result<MatchId, StoreError> {
        let snapshot = encode(m)?;
        let id = MatchId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { version: 1, snapshot });
        trace!(%id, "match inserted");
        Ok(id)
    }

    fn load(&self, id: MatchId) -> Result<Versioned<Match>, StoreError> {
        let entry = self.entries.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(Versioned {
            version: entry.version,
            value: decode(&entry.snapshot)?,
        })
    }

    fn save(&mut self, id: MatchId, expected_version: u64, m: &Match) -> Result<u64, StoreError> {
        let snapshot = encode(m)?;
        let entry = self.entries.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if entry.version != expected_version {
            warn!(%id, expected = expected_version, found = entry.version, "stale match save");
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                found: entry.version,
            });
        }

        entry.version += 1;
        entry.snapshot = snapshot;
        trace!(%id, version = entry.version, "match saved");
        Ok(entry.version)
    }

    fn delete(&mut self, id: MatchId) -> Result<(), StoreError> {
        self.entries
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
