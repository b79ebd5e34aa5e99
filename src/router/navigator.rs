use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

/// Shared cell holding the current client-side location.
///
/// `assign` is a hard redirect: it moves the location without consulting
/// route guards. The router lands here after its guard check passes, and
/// the API client lands here directly when a response invalidates the
/// session. Clone is cheap - clones share the same cell.
#[derive(Clone)]
pub struct Navigator {
    location: Arc<RwLock<String>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            location: Arc::new(RwLock::new("/".to_string())),
        }
    }

    /// Current location path.
    pub fn current(&self) -> String {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Move to `path` unconditionally, bypassing route guards.
    pub fn assign(&self, path: &str) {
        debug!(path, "Location assigned");
        *self
            .location
            .write()
            .unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
