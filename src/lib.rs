mod favorites;
mod identity;
mod keyspace;
mod library;
mod media;
mod reviews;
mod snapshot;
mod store;

#[cfg(feature = "emitter")]
mod emitter;

pub use favorites::{FavoriteEntry, FavoritesStore};
pub use identity::{
    IdentityProvider, SessionRecord, StaticIdentity, StoredIdentity, UserId, UserIdError,
};
pub use keyspace::KeySpace;
pub use library::{Library, LibraryError};
pub use media::{MediaKind, MediaRef};
pub use reviews::{Rating, RatingError, ReviewEntry, ReviewsStore};
pub use snapshot::{FavoritesSnapshot, SnapshotError};
pub use store::{InMemoryStore, KeyValueStore, StorageError};

#[cfg(feature = "emitter")]
pub use emitter::{FavoritesEmitter, ReviewsEmitter};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
