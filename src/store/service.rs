//! Caller-level match operations.
//!
//! Each mutating call is a load, engine, save bracket. The save names the
//! version that was loaded, so a concurrent writer surfaces as
//! `StoreError::VersionConflict` instead of a lost update.

use tracing::{info, instrument, warn};

use super::matches::{MatchId, MatchStore, StoreError, Versioned};
use super::registry::PlayerDirectory;
use crate::core::{Match, Player, PlayerId, RoundCandidate, TeamSide};
use crate::error::MatchError;
use crate::rules::{ProgressionEngine, RoundPatch};

/// Failure of a service call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown {0}")]
    UnknownPlayer(PlayerId),
}

/// Match operations over a store and a player directory.
#[derive(Clone, Debug)]
pub struct MatchService<S, D> {
    engine: ProgressionEngine,
    store: S,
    directory: D,
}

impl<S: MatchStore, D: PlayerDirectory> MatchService<S, D> {
    #[must_use]
    pub fn new(engine: ProgressionEngine, store: S, directory: D) -> Self {
        Self {
            engine,
            store,
            directory,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// Create a 1v1 match between two registered players.
    #[instrument(skip(self, video_url))]
    pub fn create_one_v_one(
        &mut self,
        player1: PlayerId,
        player2: PlayerId,
        video_url: Option<String>,
    ) -> Result<MatchId, ServiceError> {
        let m = Match::one_v_one(self.resolve(player1)?, self.resolve(player2)?)?;
        self.create(m, video_url)
    }

    /// Create a team match from two named rosters of registered players.
    #[instrument(skip(self, team1_players, team2_players, video_url))]
    pub fn create_team(
        &mut self,
        team1_name: &str,
        team1_players: &[PlayerId],
        team2_name: &str,
        team2_players: &[PlayerId],
        video_url: Option<String>,
    ) -> Result<MatchId, ServiceError> {
        let team1 = TeamSide::new(team1_name, self.resolve_all(team1_players)?);
        let team2 = TeamSide::new(team2_name, self.resolve_all(team2_players)?);
        let m = Match::team(team1, team2)?;
        self.create(m, video_url)
    }

    /// Latest snapshot of a match.
    pub fn get(&self, id: MatchId) -> Result<Versioned<Match>, ServiceError> {
        Ok(self.store.load(id)?)
    }

    /// Validate and append a round.
    #[instrument(skip(self, candidate), fields(chaser = %candidate.chaser, evader = %candidate.evader))]
    pub fn add_round(&mut self, id: MatchId, candidate: RoundCandidate) -> Result<Match, ServiceError> {
        self.modify(id, |engine, m| engine.propose_round(m, candidate))
    }

    #[instrument(skip(self, patch))]
    pub fn update_round(&mut self, id: MatchId, index: usize, patch: &RoundPatch) -> Result<Match, ServiceError> {
        self.modify(id, |engine, m| engine.update_round(m, index, patch))
    }

    #[instrument(skip(self, candidate))]
    pub fn insert_round(
        &mut self,
        id: MatchId,
        index: usize,
        candidate: RoundCandidate,
    ) -> Result<Match, ServiceError> {
        self.modify(id, |engine, m| engine.insert_round(m, index, candidate))
    }

    #[instrument(skip(self))]
    pub fn delete_last_round(&mut self, id: MatchId) -> Result<Match, ServiceError> {
        self.modify(id, |engine, m| engine.delete_last_round(m))
    }

    #[instrument(skip(self, url))]
    pub fn set_video_url(&mut self, id: MatchId, url: Option<String>) -> Result<Match, ServiceError> {
        self.modify(id, |engine, m| Ok(engine.set_video_url(m, url)))
    }

    #[instrument(skip(self))]
    pub fn delete_match(&mut self, id: MatchId) -> Result<(), ServiceError> {
        self.store.delete(id)?;
        info!(%id, "match deleted");
        Ok(())
    }

    fn create(&mut self, m: Match, video_url: Option<String>) -> Result<MatchId, ServiceError> {
        let m = match video_url {
            Some(url) => m.with_video_url(url),
            None => m,
        };
        let id = self.store.insert(&m)?;
        info!(%id, match_type = %m.match_type(), "match created");
        Ok(id)
    }

    fn modify<F>(&mut self, id: MatchId, op: F) -> Result<Match, ServiceError>
    where
        F: FnOnce(&ProgressionEngine, &Match) -> Result<Match, MatchError>,
    {
        let Versioned { version, value } = self.store.load(id)?;
        let next = op(&self.engine, &value)?;
        self.store.save(id, version, &next)?;
        Ok(next)
    }

    fn resolve(&self, id: PlayerId) -> Result<Player, ServiceError> {
        match self.directory.resolve(id) {
            Some(player) => Ok(player.clone()),
            None => {
                warn!(player = %id, "unknown player");
                Err(ServiceError::UnknownPlayer(id))
            }
        }
    }

    fn resolve_all(&self, ids: &[PlayerId]) -> Result<Vec<Player>, ServiceError> {
        ids.iter().map(|&id| self.resolve(id)).collect()
    }
}
