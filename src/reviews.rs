//! ReviewsStore - at most one review per user per catalog item.
//!
//! Reviews are partitioned per user the same way favorites are: one JSON
//! array per owner, full read-modify-write per mutation, errors absorbed
//! at this boundary. The one-review-per-item invariant is held
//! structurally by the derived entry id `"<owner>_<itemId>"`.
//!
//! Lifecycle per `(owner, item)`: no review, then `add` creates one,
//! any number of further `add`/`update` calls refresh it, `remove`
//! deletes it. `update` and `remove` without an existing review are
//! no-ops, not errors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::identity::UserId;
use crate::keyspace::KeySpace;
use crate::store::KeyValueStore;

/// A star rating, 1 through 5 inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(5);

    /// Create a rating. Rejects values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (1..=5).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(RatingError { value })
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error for an out-of-range rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingError {
    pub value: u8,
}

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating must be between 1 and 5, got {}", self.value)
    }
}

impl std::error::Error for RatingError {}

/// One user's review of one catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    /// Derived `"<owner>_<itemId>"`.
    pub id: String,
    pub item_id: u64,
    pub owner_id: UserId,
    pub rating: Rating,
    /// Free text, may be empty.
    pub comment: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every edit.
    pub updated_at: DateTime<Utc>,
}

impl ReviewEntry {
    fn new(owner: &UserId, item_id: u64, rating: Rating, comment: String) -> Self {
        let now = Utc::now();
        ReviewEntry {
            id: format!("{}_{}", owner, item_id),
            item_id,
            owner_id: owner.clone(),
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    fn is_by(&self, owner: &UserId, item_id: u64) -> bool {
        self.item_id == item_id && &self.owner_id == owner
    }
}

/// Per-user reviews over an injected key-value store.
#[derive(Clone)]
pub struct ReviewsStore<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KeyValueStore> ReviewsStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_keyspace(store, KeySpace::default())
    }

    pub fn with_keyspace(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Submit `owner`'s review of `item_id`.
    ///
    /// The first submit creates the entry; a repeat submit for the same
    /// item replaces its rating, comment and `updated_at` while keeping
    /// the original `created_at`. Returns the persisted entry, or None
    /// when the write failed.
    pub fn add(
        &self,
        owner: &UserId,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Option<ReviewEntry> {
        let comment = comment.into();
        let mut entries = self.read(owner);

        let entry = match entries.iter_mut().find(|e| e.is_by(owner, item_id)) {
            Some(existing) => {
                existing.rating = rating;
                existing.comment = comment;
                existing.updated_at = Utc::now();
                existing.clone()
            }
            None => {
                let entry = ReviewEntry::new(owner, item_id, rating, comment);
                entries.push(entry.clone());
                entry
            }
        };

        if self.write(owner, &entries) {
            Some(entry)
        } else {
            None
        }
    }

    /// Edit an existing review. Unlike [`add`](Self::add) this never
    /// creates: without an existing entry it returns None and mutates
    /// nothing.
    pub fn update(
        &self,
        owner: &UserId,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Option<ReviewEntry> {
        let mut entries = self.read(owner);
        let existing = entries.iter_mut().find(|e| e.is_by(owner, item_id))?;

        existing.rating = rating;
        existing.comment = comment.into();
        existing.updated_at = Utc::now();
        let entry = existing.clone();

        if self.write(owner, &entries) {
            Some(entry)
        } else {
            None
        }
    }

    /// Delete `owner`'s review of `item_id`. The filter requires both
    /// owner and item to match, so entries that belong to someone else
    /// are never dropped even if they ended up in this partition.
    /// Removing a non-existent review succeeds.
    pub fn remove(&self, owner: &UserId, item_id: u64) -> bool {
        let mut entries = self.read(owner);
        entries.retain(|e| !e.is_by(owner, item_id));
        self.write(owner, &entries)
    }

    /// `owner`'s own review of `item_id`, if any.
    pub fn get_own(&self, owner: &UserId, item_id: u64) -> Option<ReviewEntry> {
        self.read(owner)
            .into_iter()
            .find(|e| e.is_by(owner, item_id))
    }

    /// Reviews of `item_id` visible in `owner`'s partition.
    ///
    /// Collections are stored per user, so this can only ever surface
    /// the owner's own review(s) of the item; it is not a cross-user
    /// query.
    pub fn for_item(&self, owner: &UserId, item_id: u64) -> Vec<ReviewEntry> {
        self.read(owner)
            .into_iter()
            .filter(|e| e.item_id == item_id)
            .collect()
    }

    fn read(&self, owner: &UserId) -> Vec<ReviewEntry> {
        let key = self.keys.reviews_key(owner);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, owner = %owner, "reviews read failed");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, owner = %owner, "malformed reviews record, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, owner: &UserId, entries: &[ReviewEntry]) -> bool {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, owner = %owner, "reviews serialization failed");
                return false;
            }
        };
        match self.store.set(&self.keys.reviews_key(owner), &json) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, owner = %owner, "reviews write failed");
                false
            }
        }
    }
}
