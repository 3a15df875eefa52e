//! Library - the signed-in session facade over favorites and reviews.
//!
//! Core stores take an explicit owner on every call and are total; this
//! facade is where "who is signed in" gets resolved. Every operation
//! asks the [`IdentityProvider`] first and rejects with
//! [`LibraryError::NotSignedIn`] when nobody is - a distinguishable
//! result, not a silent no-op, and nothing is ever persisted for an
//! unauthenticated caller.

use std::fmt;

use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::identity::{IdentityProvider, UserId};
use crate::keyspace::KeySpace;
use crate::media::{MediaKind, MediaRef};
use crate::reviews::{Rating, ReviewEntry, ReviewsStore};
use crate::snapshot::FavoritesSnapshot;
use crate::store::KeyValueStore;

/// Favorites and reviews bound to whatever session the identity
/// provider reports, over one shared backing store.
pub struct Library<S, I> {
    identity: I,
    favorites: FavoritesStore<S>,
    reviews: ReviewsStore<S>,
}

/// Error type for session-gated operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    NotSignedIn,
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotSignedIn => write!(f, "no user is signed in"),
        }
    }
}

impl std::error::Error for LibraryError {}

impl<S: KeyValueStore + Clone, I: IdentityProvider> Library<S, I> {
    pub fn new(store: S, identity: I) -> Self {
        Self::with_keyspace(store, identity, KeySpace::default())
    }

    pub fn with_keyspace(store: S, identity: I, keys: KeySpace) -> Self {
        Self {
            favorites: FavoritesStore::with_keyspace(store.clone(), keys.clone()),
            reviews: ReviewsStore::with_keyspace(store, keys),
            identity,
        }
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.identity.current_user()
    }

    fn owner(&self) -> Result<UserId, LibraryError> {
        self.identity.current_user().ok_or(LibraryError::NotSignedIn)
    }

    // --- Favorites ---

    pub fn favorites(&self) -> Result<Vec<FavoriteEntry>, LibraryError> {
        Ok(self.favorites.list(&self.owner()?))
    }

    pub fn add_favorite(&self, item: MediaRef) -> Result<bool, LibraryError> {
        Ok(self.favorites.add(&self.owner()?, item))
    }

    pub fn remove_favorite(&self, item: MediaRef) -> Result<bool, LibraryError> {
        Ok(self.favorites.remove(&self.owner()?, item))
    }

    /// Flip the favorite state of `item`. Returns whether the item is
    /// favorited after the call.
    pub fn toggle_favorite(&self, item: MediaRef) -> Result<bool, LibraryError> {
        let owner = self.owner()?;
        if self.favorites.is_favorite(&owner, item) {
            self.favorites.remove(&owner, item);
            Ok(false)
        } else if self.favorites.add(&owner, item) {
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_favorite(&self, item: MediaRef) -> Result<bool, LibraryError> {
        Ok(self.favorites.is_favorite(&self.owner()?, item))
    }

    pub fn favorite_count(&self) -> Result<usize, LibraryError> {
        Ok(self.favorites.count(&self.owner()?))
    }

    pub fn favorites_by_kind(&self, kind: MediaKind) -> Result<Vec<FavoriteEntry>, LibraryError> {
        Ok(self.favorites.by_kind(&self.owner()?, kind))
    }

    pub fn clear_favorites(&self) -> Result<bool, LibraryError> {
        Ok(self.favorites.clear(&self.owner()?))
    }

    pub fn export_favorites(&self) -> Result<FavoritesSnapshot, LibraryError> {
        Ok(self.favorites.export(&self.owner()?))
    }

    pub fn import_favorites(&self, snapshot: &FavoritesSnapshot) -> Result<bool, LibraryError> {
        Ok(self.favorites.import(&self.owner()?, snapshot))
    }

    // --- Reviews ---

    pub fn save_review(
        &self,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Result<Option<ReviewEntry>, LibraryError> {
        Ok(self.reviews.add(&self.owner()?, item_id, rating, comment))
    }

    pub fn edit_review(
        &self,
        item_id: u64,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Result<Option<ReviewEntry>, LibraryError> {
        Ok(self.reviews.update(&self.owner()?, item_id, rating, comment))
    }

    pub fn remove_review(&self, item_id: u64) -> Result<bool, LibraryError> {
        Ok(self.reviews.remove(&self.owner()?, item_id))
    }

    pub fn my_review(&self, item_id: u64) -> Result<Option<ReviewEntry>, LibraryError> {
        Ok(self.reviews.get_own(&self.owner()?, item_id))
    }

    pub fn reviews_for_item(&self, item_id: u64) -> Result<Vec<ReviewEntry>, LibraryError> {
        Ok(self.reviews.for_item(&self.owner()?, item_id))
    }
}
