//! Application context wiring for Opsdeck clients.
//!
//! `App` owns the configuration and the shared session, navigator, router,
//! and API client handles. Collaborators receive their handles here at
//! construction; there is no ambient global state, which keeps every piece
//! testable with its own store.

use anyhow::Result;
use tracing::warn;

use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::config::Config;
use crate::router::{default_routes, Navigator, Router};

pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub navigator: Navigator,
    pub router: Router,
    pub api: ApiClient,
}

impl App {
    /// Create the app context from the on-disk configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::load()?)
    }

    /// Create the app context from an explicit configuration.
    ///
    /// Hydrates the session from disk; an unreadable session file is
    /// treated as being logged out, not as a startup failure.
    pub fn with_config(config: Config) -> Result<Self> {
        let session = SessionStore::open(config.session_dir()?);
        if let Err(e) = session.load() {
            warn!(error = %e, "Could not restore persisted session");
        }

        let navigator = Navigator::new();
        let router = Router::new(default_routes(), session.clone(), navigator.clone());
        let api = ApiClient::new(&config, session.clone(), navigator.clone())?;

        Ok(Self {
            config,
            session,
            navigator,
            router,
            api,
        })
    }

    /// Log in and remember the username for the next login prompt.
    ///
    /// Config persistence is best-effort: a failure to save the username
    /// hint never undoes a successful login.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.api.login(username, password).await?;

        self.config.last_username = Some(username.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Could not persist config");
        }
        Ok(())
    }

    /// True iff a session credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionData;
    use crate::router::NavigationOutcome;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            base_url: Some("http://backend.test/api/v1".to_string()),
            session_dir_override: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_logged_out_without_persisted_session() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let app = App::with_config(config_in(&dir)).expect("Failed to build app");
        assert!(!app.is_authenticated());
        assert_eq!(
            app.router.navigate("/"),
            NavigationOutcome::Redirected {
                to: "/login".to_string()
            }
        );
    }

    #[test]
    fn test_hydrates_persisted_session_at_startup() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let seed = SessionStore::open(dir.path().to_path_buf());
        seed.set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");

        let app = App::with_config(config_in(&dir)).expect("Failed to build app");
        assert!(app.is_authenticated());
        assert_eq!(app.router.navigate("/"), NavigationOutcome::Allowed);
    }

    #[test]
    fn test_corrupt_session_file_means_logged_out() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("session.json"), "not json")
            .expect("Failed to write corrupt session file");

        let app = App::with_config(config_in(&dir)).expect("Failed to build app");
        assert!(!app.is_authenticated());
    }
}
