//! FavoritesStore - the durable set of favorited catalog items per user.
//!
//! Each user's favorites live under one key as a JSON array, newest
//! first. Every mutation is a full read-modify-write of that array; the
//! backing store's atomic `set` is what keeps a record internally
//! consistent. Failures never escape: reads that fail or do not parse
//! degrade to the empty collection (the bad record is replaced by the
//! next successful write), and writes that fail report `false`.
//!
//! ## Example
//!
//! ```ignore
//! use screenscene::{FavoritesStore, InMemoryStore, MediaRef, UserId};
//!
//! let favorites = FavoritesStore::new(InMemoryStore::new());
//! let owner = UserId::new("user-1")?;
//!
//! favorites.add(&owner, MediaRef::movie(550));
//! assert!(favorites.is_favorite(&owner, MediaRef::movie(550)));
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::identity::UserId;
use crate::keyspace::KeySpace;
use crate::media::{MediaKind, MediaRef};
use crate::snapshot::FavoritesSnapshot;
use crate::store::KeyValueStore;

/// One favorited item. Created on add, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    /// Derived `"<owner>_<kind>_<itemId>"`.
    pub id: String,
    pub item_id: u64,
    pub media_kind: MediaKind,
    pub owner_id: UserId,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    fn new(owner: &UserId, item: MediaRef) -> Self {
        FavoriteEntry {
            id: Self::derive_id(owner, item),
            item_id: item.id,
            media_kind: item.kind,
            owner_id: owner.clone(),
            added_at: Utc::now(),
        }
    }

    fn derive_id(owner: &UserId, item: MediaRef) -> String {
        format!("{}_{}_{}", owner, item.kind, item.id)
    }

    /// The catalog reference this entry points at.
    pub fn media(&self) -> MediaRef {
        MediaRef {
            id: self.item_id,
            kind: self.media_kind,
        }
    }

    fn matches(&self, item: MediaRef) -> bool {
        self.item_id == item.id && self.media_kind == item.kind
    }
}

/// Per-user favorites over an injected key-value store.
///
/// At most one entry per `(item, kind)` per owner; duplicate adds are
/// rejected, not overwritten.
#[derive(Clone)]
pub struct FavoritesStore<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_keyspace(store, KeySpace::default())
    }

    pub fn with_keyspace(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// All favorites for `owner`, most recently added first. Never fails;
    /// a missing or unreadable record is the empty collection.
    pub fn list(&self, owner: &UserId) -> Vec<FavoriteEntry> {
        self.read(owner)
    }

    /// Favorite `item` for `owner`.
    ///
    /// Returns false without touching storage when the item is already
    /// favorited, and when the write fails.
    pub fn add(&self, owner: &UserId, item: MediaRef) -> bool {
        let mut entries = self.read(owner);
        if entries.iter().any(|entry| entry.matches(item)) {
            return false;
        }
        entries.insert(0, FavoriteEntry::new(owner, item));
        self.write(owner, &entries)
    }

    /// Unfavorite `item` for `owner`.
    ///
    /// Returns true when the filtered collection persisted, whether or
    /// not an entry existed; callers wanting the distinction should
    /// query [`is_favorite`](Self::is_favorite) first.
    pub fn remove(&self, owner: &UserId, item: MediaRef) -> bool {
        let mut entries = self.read(owner);
        entries.retain(|entry| !entry.matches(item));
        self.write(owner, &entries)
    }

    /// Whether `item` is currently favorited by `owner`. Pure query.
    pub fn is_favorite(&self, owner: &UserId, item: MediaRef) -> bool {
        self.read(owner).iter().any(|entry| entry.matches(item))
    }

    /// Number of favorites held by `owner`.
    pub fn count(&self, owner: &UserId) -> usize {
        self.read(owner).len()
    }

    /// Delete `owner`'s entire collection.
    pub fn clear(&self, owner: &UserId) -> bool {
        match self.store.remove(&self.keys.favorites_key(owner)) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, owner = %owner, "favorites clear failed");
                false
            }
        }
    }

    /// Favorites of one catalog namespace, same order as [`list`](Self::list).
    pub fn by_kind(&self, owner: &UserId, kind: MediaKind) -> Vec<FavoriteEntry> {
        self.read(owner)
            .into_iter()
            .filter(|entry| entry.media_kind == kind)
            .collect()
    }

    /// Snapshot `owner`'s collection for backup or transfer.
    pub fn export(&self, owner: &UserId) -> FavoritesSnapshot {
        FavoritesSnapshot::capture(owner.clone(), self.list(owner))
    }

    /// Replace `owner`'s collection with the snapshot's entries. No merge
    /// with the existing collection takes place.
    ///
    /// Entries are re-stamped to `owner` and deduplicated by
    /// `(item, kind)` so a snapshot taken from another account still
    /// yields a valid collection. Returns false without side effects if
    /// the write fails.
    pub fn import(&self, owner: &UserId, snapshot: &FavoritesSnapshot) -> bool {
        let mut seen = HashSet::new();
        let entries: Vec<FavoriteEntry> = snapshot
            .entries
            .iter()
            .filter(|entry| seen.insert((entry.item_id, entry.media_kind)))
            .map(|entry| FavoriteEntry {
                id: FavoriteEntry::derive_id(owner, entry.media()),
                item_id: entry.item_id,
                media_kind: entry.media_kind,
                owner_id: owner.clone(),
                added_at: entry.added_at,
            })
            .collect();
        self.write(owner, &entries)
    }

    fn read(&self, owner: &UserId) -> Vec<FavoriteEntry> {
        let key = self.keys.favorites_key(owner);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, owner = %owner, "favorites read failed");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, owner = %owner, "malformed favorites record, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, owner: &UserId, entries: &[FavoriteEntry]) -> bool {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, owner = %owner, "favorites serialization failed");
                return false;
            }
        };
        match self.store.set(&self.keys.favorites_key(owner), &json) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, owner = %owner, "favorites write failed");
                false
            }
        }
    }
}
