//! Identifier types for users, games and picks.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// An opaque entity identifier.
///
/// User and game ids are supplied by the upstream store as-is. Pick ids are
/// derived from the pick's ownership tuple so the same pick always hashes to
/// the same id, whichever origin it arrived through.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Derive an id from its identifying fields.
    /// Uses SHA256 and keeps the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Pool participant.
pub type UserId = EntityId;

/// A single contest on the schedule.
pub type GameId = EntityId;

/// A user's pick for one game, keyed by (season, week, user, game).
pub type PickId = EntityId;

/// Build the deterministic pick id for an ownership tuple.
pub fn pick_id(season: u32, week: u32, user_id: &UserId, game_id: &GameId) -> PickId {
    EntityId::generate(&[
        &season.to_string(),
        &week.to_string(),
        user_id.as_str(),
        game_id.as_str(),
    ])
}
