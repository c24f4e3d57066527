//! Player resolution.
//!
//! The engine never resolves player ids itself. `PlayerDirectory` is the
//! collaborator that does; `PlayerRegistry` is an in-memory implementation.

use rustc_hash::FxHashMap;

use crate::core::{Player, PlayerId};

/// Resolves player ids to player records.
pub trait PlayerDirectory {
    /// Look up a player. `None` if unknown.
    fn resolve(&self, id: PlayerId) -> Option<&Player>;
}

/// In-memory player registry.
///
/// ## Example
///
/// ```
/// use chase_tag::store::{PlayerDirectory, PlayerRegistry};
///
/// let mut registry = PlayerRegistry::new();
/// let ann = registry.register_auto("Ann").unwrap();
///
/// assert_eq!(registry.resolve(ann).unwrap().name, "Ann");
/// ```
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: FxHashMap<PlayerId, Player>,
    next_id: u64,
    /// Set once `PlayerId(u64::MAX)` is taken; no fresh id remains above it.
    ids_exhausted: bool,
}

impl PlayerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player, replacing any record with the same id.
    ///
    /// Returns the replaced record, if any.
    pub fn register(&mut self, player: Player) -> Option<Player> {
        match player.id.raw().checked_add(1) {
            Some(next) => self.next_id = self.next_id.max(next),
            None => self.ids_exhausted = true,
        }
        self.players.insert(player.id, player)
    }

    /// Register a player under a fresh id, one above the highest id seen.
    ///
    /// Returns `None` once `u64::MAX` has been handed out or registered.
    pub fn register_auto(&mut self, name: impl Into<String>) -> Option<PlayerId> {
        if self.ids_exhausted {
            return None;
        }
        let id = PlayerId::new(self.next_id);
        self.register(Player::new(id, name));
        Some(id)
    }

    /// Remove a player. Returns the removed record.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate over all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }
}

impl PlayerDirectory for PlayerRegistry {
    fn resolve(&self, id: PlayerId) -> Option<&Player> {
        self.get(id)
    }
}
