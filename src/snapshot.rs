//! Snapshot - backup and transfer format for a favorites collection.
//!
//! Two interchange forms: plain JSON for backup files, and a compact
//! token (bitcode-serialized, base64-encoded) that fits in a chat
//! message or query string for sharing a collection between devices.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteEntry;
use crate::identity::UserId;

/// A point-in-time copy of one user's favorites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesSnapshot {
    pub owner_id: UserId,
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<FavoriteEntry>,
    pub count: usize,
}

impl FavoritesSnapshot {
    /// Capture a snapshot of `entries` as owned by `owner`.
    pub fn capture(owner: UserId, entries: Vec<FavoriteEntry>) -> Self {
        let count = entries.len();
        FavoritesSnapshot {
            owner_id: owner,
            exported_at: Utc::now(),
            entries,
            count,
        }
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Parse a JSON document. Fails on anything that is not a snapshot
    /// with an entry sequence.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Encode to a compact portable token.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        let bytes =
            bitcode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        Ok(STANDARD.encode(bytes))
    }

    /// Decode a token produced by [`encode`](Self::encode).
    pub fn decode(token: &str) -> Result<Self, SnapshotError> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        bitcode::deserialize(&bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}

/// Error type for snapshot interchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Encode(String),
    Decode(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Encode(msg) => write!(f, "snapshot encode error: {}", msg),
            SnapshotError::Decode(msg) => write!(f, "snapshot decode error: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesStore;
    use crate::media::MediaRef;
    use crate::store::InMemoryStore;

    fn sample() -> FavoritesSnapshot {
        let owner = UserId::new("user-1").unwrap();
        let favorites = FavoritesStore::new(InMemoryStore::new());
        favorites.add(&owner, MediaRef::movie(550));
        favorites.add(&owner, MediaRef::show(1399));
        favorites.export(&owner)
    }

    #[test]
    fn json_round_trip() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        assert_eq!(FavoritesSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn json_wire_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ownerId"], "user-1");
        assert_eq!(value["count"], 2);
        assert!(value["entries"].is_array());
        assert!(value["exportedAt"].is_string());
        assert_eq!(value["entries"][0]["mediaKind"], "show");
    }

    #[test]
    fn token_round_trip() {
        let snapshot = sample();
        let token = snapshot.encode().unwrap();
        assert_eq!(FavoritesSnapshot::decode(&token).unwrap(), snapshot);
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(FavoritesSnapshot::decode("not base64 at all!!!").is_err());
        assert!(FavoritesSnapshot::from_json("{\"ownerId\":\"u\"}").is_err());
    }
}
