use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Session file name in the store directory
const SESSION_FILE: &str = "session.json";

/// Profile details for the logged-in user, when known.
/// The token endpoint does not return a profile, so this stays empty
/// unless a caller fills it in from another source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, username: String) -> Self {
        Self {
            token,
            username,
            user: None,
            created_at: Utc::now(),
        }
    }

    /// Minutes since the token was issued (for display)
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.created_at).num_minutes().max(0)
    }
}

/// Single source of truth for the client's authentication state.
///
/// Clone is cheap - all clones share the same underlying cell, so the
/// API client and router observe a login or logout immediately. The
/// current session is persisted to `session.json` so a restart does not
/// force a new login.
#[derive(Clone)]
pub struct SessionStore {
    dir: PathBuf,
    data: Arc<RwLock<Option<SessionData>>>,
}

impl SessionStore {
    pub fn open(dir: PathBuf) -> Self {
        Self {
            dir,
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Hydrate the store from a previously persisted session.
    /// Returns true if a session was restored.
    pub fn load(&self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(false);
        }

        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        let data: SessionData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;

        info!(username = %data.username, "Restored session from disk");
        *self.cell_mut() = Some(data);
        Ok(true)
    }

    /// Replace the current session and persist it.
    ///
    /// The file is written before memory is updated; a write failure
    /// leaves the prior state untouched.
    pub fn set(&self, data: SessionData) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&data)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;

        *self.cell_mut() = Some(data);
        Ok(())
    }

    /// Clear the session in memory and remove the persisted copy.
    ///
    /// Idempotent, no network call. A file removal problem is logged
    /// rather than raised - the in-memory clear is what revokes access.
    pub fn clear(&self) {
        let had_session = self.cell_mut().take().is_some();
        if had_session {
            debug!("Session cleared");
        }

        let path = self.session_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, "Failed to remove session file");
            }
        }
    }

    /// Bearer token for the current session, if any.
    pub fn token(&self) -> Option<String> {
        self.cell().as_ref().map(|d| d.token.clone())
    }

    /// Username that obtained the current session, if any.
    pub fn username(&self) -> Option<String> {
        self.cell().as_ref().map(|d| d.username.clone())
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<SessionData> {
        self.cell().clone()
    }

    /// True iff a credential is present. Derived from the session cell,
    /// never stored independently.
    pub fn is_authenticated(&self) -> bool {
        self.cell().is_some()
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn cell(&self) -> RwLockReadGuard<'_, Option<SessionData>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cell_mut(&self) -> RwLockWriteGuard<'_, Option<SessionData>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().to_path_buf())
    }

    #[test]
    fn test_is_authenticated_tracks_token_presence() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        assert!(!store.is_authenticated());

        store
            .set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("abc123"));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        store
            .set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");

        // A fresh store over the same directory stands in for a new process.
        let restarted = store_in(&dir);
        assert!(!restarted.is_authenticated());
        assert!(restarted.load().expect("Failed to load session"));
        assert!(restarted.is_authenticated());
        assert_eq!(restarted.token().as_deref(), Some("abc123"));
        assert_eq!(restarted.username().as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_load_without_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        assert!(!store.load().expect("Load of absent session failed"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        store
            .set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");

        store.clear();
        store.clear();
        assert!(!store.is_authenticated());

        let restarted = store_in(&dir);
        assert!(!restarted.load().expect("Failed to load session"));
    }

    #[test]
    fn test_clones_share_state() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        let observer = store.clone();

        store
            .set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");
        assert!(observer.is_authenticated());

        observer.clear();
        assert!(!store.is_authenticated());
    }
}
