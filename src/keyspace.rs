use crate::identity::UserId;

/// Derives the storage keys a deployment uses.
///
/// The default layout is `favorites:<owner>` / `reviews:<owner>` /
/// `session`. An application namespace keeps several apps from clashing
/// in one origin-wide store: `KeySpace::namespaced("screenscene")` yields
/// `screenscene:favorites:<owner>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySpace {
    namespace: Option<String>,
}

impl KeySpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespaced(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }

    pub fn favorites_key(&self, owner: &UserId) -> String {
        self.prefixed(format!("favorites:{}", owner))
    }

    pub fn reviews_key(&self, owner: &UserId) -> String {
        self.prefixed(format!("reviews:{}", owner))
    }

    pub fn session_key(&self) -> String {
        self.prefixed("session".to_string())
    }

    fn prefixed(&self, key: String) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key,
        }
    }
}
