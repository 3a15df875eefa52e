//! Change notification wrappers around the stores.
//!
//! Presentation layers that re-render on change can subscribe here
//! instead of polling. Wrappers delegate to the underlying store and,
//! after a mutation actually persists, emit an event whose payload is
//! the affected entry as JSON. Everything stays in-process.
//!
//! # Example
//!
//! ```ignore
//! use screenscene::{FavoritesEmitter, FavoritesStore, InMemoryStore, MediaRef, UserId};
//!
//! let mut favorites = FavoritesEmitter::new(FavoritesStore::new(InMemoryStore::new()));
//!
//! favorites.on("FavoriteAdded", |payload| {
//!     println!("favorited: {}", payload);
//! });
//!
//! favorites.add(&owner, MediaRef::movie(550));
//! ```

use event_emitter_rs::EventEmitter;
use tracing::warn;

use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::identity::UserId;
use crate::media::MediaRef;
use crate::reviews::{Rating, ReviewEntry, ReviewsStore};
use crate::snapshot::FavoritesSnapshot;
use crate::store::KeyValueStore;

fn emit_entry<T: serde::Serialize>(emitter: &mut EventEmitter, event: &str, entry: &T) {
    match serde_json::to_string(entry) {
        Ok(payload) => {
            for handle in emitter.emit(event, payload) {
                let _ = handle.join();
            }
        }
        Err(err) => warn!(%err, event, "event payload serialization failed"),
    }
}

/// A [`FavoritesStore`] that emits `FavoriteAdded`, `FavoriteRemoved`,
/// `FavoritesCleared` and `FavoritesImported` events.
pub struct FavoritesEmitter<S> {
    store: FavoritesStore<S>,
    emitter: EventEmitter,
}

impl<S: KeyValueStore> FavoritesEmitter<S> {
    pub fn new(store: FavoritesStore<S>) -> Self {
        Self {
            store,
            emitter: EventEmitter::new(),
        }
    }

    /// The wrapped store, for queries.
    pub fn store(&self) -> &FavoritesStore<S> {
        &self.store
    }

    /// Unwrap and return the underlying store.
    pub fn into_store(self) -> FavoritesStore<S> {
        self.store
    }

    /// Register a listener. The payload is the affected entry as JSON
    /// (for `FavoritesImported`, the imported snapshot).
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    pub fn add(&mut self, owner: &UserId, item: MediaRef) -> bool {
        if !self.store.add(owner, item) {
            return false;
        }
        // add prepends, so the new entry is at the front
        if let Some(entry) = self.store.list(owner).into_iter().next() {
            emit_entry(&mut self.emitter, "FavoriteAdded", &entry);
        }
        true
    }

    pub fn remove(&mut self, owner: &UserId, item: MediaRef) -> bool {
        let removed: Option<FavoriteEntry> = self
            .store
            .list(owner)
            .into_iter()
            .find(|entry| entry.media() == item);
        if !self.store.remove(owner, item) {
            return false;
        }
        if let Some(entry) = removed {
            emit_entry(&mut self.emitter, "FavoriteRemoved", &entry);
        }
        true
    }

    pub fn clear(&mut self, owner: &UserId) -> bool {
        if !self.store.clear(owner) {
            return false;
        }
        emit_entry(&mut self.emitter, "FavoritesCleared", &owner);
        true
    }

    pub fn import(&mut self, owner: &UserId, snapshot: &FavoritesSnapshot) -> bool {
        if !self.store.import(owner, snapshot) {
            return false;
        }
        emit_entry(&mut self.emitter, "FavoritesImported", snapshot);
        true
    }
}

/// A [`ReviewsStore`] that emits `ReviewSaved`, `ReviewUpdated` and
/// `ReviewRemoved` events.
pub struct ReviewsEmitter<S> {
    store: ReviewsStore<S>,
    emitter: EventEmitter,
}

impl<S: KeyValueStore> ReviewsEmitter<S> {
    pub fn new(store: ReviewsStore<S>) -> Self {
        Self {
            store,
            emitter: EventEmitter::new(),
        }
    }

    /// The wrapped store, for queries.
    pub fn store(&self) -> &ReviewsStore<S> {
        &self.store
    }

    /// Unwrap and return the underlying store.
    pub fn into_store(self) -> ReviewsStore<S> {
        self.store
    }

    /// Register a listener. The payload is the affected entry as JSON.
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    pub fn add(
        &mut self,
        owner: &UserId,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Option<ReviewEntry> {
        let entry = self.store.add(owner, item_id, rating, comment)?;
        emit_entry(&mut self.emitter, "ReviewSaved", &entry);
        Some(entry)
    }

    pub fn update(
        &mut self,
        owner: &UserId,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Option<ReviewEntry> {
        let entry = self.store.update(owner, item_id, rating, comment)?;
        emit_entry(&mut self.emitter, "ReviewUpdated", &entry);
        Some(entry)
    }

    pub fn remove(&mut self, owner: &UserId, item_id: u64) -> bool {
        let removed = self.store.get_own(owner, item_id);
        if !self.store.remove(owner, item_id) {
            return false;
        }
        if let Some(entry) = removed {
            emit_entry(&mut self.emitter, "ReviewRemoved", &entry);
        }
        true
    }
}
