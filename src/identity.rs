//! Identity - who owns a collection.
//!
//! The stores never consult an ambient "current user"; every operation
//! takes an explicit [`UserId`]. The [`IdentityProvider`] trait is the
//! seam where a signed-in session (or the lack of one) comes from, with
//! two interchangeable implementations: an in-memory session for hosts
//! that manage authentication themselves, and a store-backed session
//! that survives restarts the way a browser session survives reloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::keyspace::KeySpace;
use crate::store::KeyValueStore;

/// A stable, non-empty user identifier.
///
/// Validation happens at construction and on deserialization, so a
/// `UserId` in hand is always a usable storage-key component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user id. Rejects empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserIdError);
        }
        Ok(UserId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Error for an empty user identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdError;

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user id must not be empty")
    }
}

impl std::error::Error for UserIdError {}

/// Supplies the currently authenticated user, if any.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// An in-memory session: the host resolves authentication elsewhere and
/// hands the result in.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity {
    user: Option<UserId>,
}

impl StaticIdentity {
    /// A session signed in as `user`.
    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// An anonymous session.
    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}

/// The persisted shape of an active session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_id: UserId,
    pub signed_in_at: DateTime<Utc>,
}

/// A session persisted in the key-value store under the keyspace's
/// session key, the analog of a local-storage-backed sign-in.
///
/// Read failures and malformed records degrade to "not signed in";
/// write failures degrade to `false`. No error escapes.
#[derive(Clone)]
pub struct StoredIdentity<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KeyValueStore> StoredIdentity<S> {
    pub fn new(store: S) -> Self {
        Self::with_keyspace(store, KeySpace::default())
    }

    pub fn with_keyspace(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Persist `user` as the active session. Returns false if the write
    /// failed or the record could not be serialized.
    pub fn sign_in(&self, user: UserId) -> bool {
        let record = SessionRecord {
            user_id: user,
            signed_in_at: Utc::now(),
        };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "session record serialization failed");
                return false;
            }
        };
        match self.store.set(&self.keys.session_key(), &json) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "session write failed");
                false
            }
        }
    }

    /// Drop the active session.
    pub fn sign_out(&self) -> bool {
        match self.store.remove(&self.keys.session_key()) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "session removal failed");
                false
            }
        }
    }
}

impl<S: KeyValueStore> IdentityProvider for StoredIdentity<S> {
    fn current_user(&self) -> Option<UserId> {
        let raw = match self.store.get(&self.keys.session_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, "session read failed");
                return None;
            }
        };
        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Some(record.user_id),
            Err(err) => {
                warn!(%err, "malformed session record");
                None
            }
        }
    }
}
