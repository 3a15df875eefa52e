use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog namespace of a media item.
///
/// Movie and show identifiers are assigned independently by the remote
/// catalog and may collide, so every favorites operation keys on the
/// `(id, kind)` pair rather than the id alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

/// A reference to one item in the remote catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    pub kind: MediaKind,
}

impl MediaRef {
    pub fn movie(id: u64) -> Self {
        MediaRef {
            id,
            kind: MediaKind::Movie,
        }
    }

    pub fn show(id: u64) -> Self {
        MediaRef {
            id,
            kind: MediaKind::Show,
        }
    }
}
