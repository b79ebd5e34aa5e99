use tracing::debug;

use crate::auth::SessionStore;

use super::Navigator;

/// Path of the login route. Never guarded, so a redirect cannot loop.
pub const LOGIN_PATH: &str = "/login";

/// A client-side route. `requires_auth` marks the route and everything
/// nested under its path as reachable only with a live session.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
}

impl Route {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            requires_auth: false,
        }
    }

    pub fn protected(path: &str, name: &str) -> Self {
        Self {
            requires_auth: true,
            ..Self::new(path, name)
        }
    }
}

/// Default route table: home is protected, login is public.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::protected("/", "home"),
        Route::new(LOGIN_PATH, "login"),
    ]
}

/// Outcome of a navigation attempt. Terminal either way - no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Allowed,
    Redirected { to: String },
}

/// Pre-navigation authentication guard over a route table.
///
/// Every routed transition goes through `navigate`; only the API client's
/// session-expiry handler moves the navigator without passing here.
pub struct Router {
    routes: Vec<Route>,
    session: SessionStore,
    navigator: Navigator,
}

impl Router {
    pub fn new(routes: Vec<Route>, session: SessionStore, navigator: Navigator) -> Self {
        Self {
            routes,
            session,
            navigator,
        }
    }

    /// Routes matched by `to`: the exact route plus any ancestors by path
    /// segment. The root route matches only itself, so `/login` never
    /// inherits the home guard.
    fn matched(&self, to: &str) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|r| {
                r.path == to || (r.path != "/" && to.starts_with(&format!("{}/", r.path)))
            })
            .collect()
    }

    /// Resolve a navigation attempt.
    ///
    /// When any matched route requires authentication and no session is
    /// present, the target is replaced with the login route; otherwise the
    /// transition proceeds unchanged. A path matching no route is allowed.
    pub fn navigate(&self, to: &str) -> NavigationOutcome {
        let requires_auth = self.matched(to).iter().any(|r| r.requires_auth);

        if requires_auth && !self.session.is_authenticated() {
            debug!(to, "Unauthenticated navigation, redirecting to login");
            self.navigator.assign(LOGIN_PATH);
            return NavigationOutcome::Redirected {
                to: LOGIN_PATH.to_string(),
            };
        }

        self.navigator.assign(to);
        NavigationOutcome::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionData;

    fn router_in(dir: &tempfile::TempDir) -> (Router, SessionStore, Navigator) {
        let session = SessionStore::open(dir.path().to_path_buf());
        let navigator = Navigator::new();
        let router = Router::new(default_routes(), session.clone(), navigator.clone());
        (router, session, navigator)
    }

    fn login(session: &SessionStore) {
        session
            .set(SessionData::new("abc123".to_string(), "user@example.com".to_string()))
            .expect("Failed to store session");
    }

    #[test]
    fn test_home_redirects_when_unauthenticated() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (router, _session, navigator) = router_in(&dir);

        let outcome = router.navigate("/");
        assert_eq!(
            outcome,
            NavigationOutcome::Redirected {
                to: LOGIN_PATH.to_string()
            }
        );
        assert_eq!(navigator.current(), LOGIN_PATH);
    }

    #[test]
    fn test_login_route_is_always_reachable() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (router, _session, navigator) = router_in(&dir);

        assert_eq!(router.navigate(LOGIN_PATH), NavigationOutcome::Allowed);
        assert_eq!(navigator.current(), LOGIN_PATH);
    }

    #[test]
    fn test_home_allowed_when_authenticated() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (router, session, navigator) = router_in(&dir);
        login(&session);

        assert_eq!(router.navigate("/"), NavigationOutcome::Allowed);
        assert_eq!(navigator.current(), "/");
    }

    #[test]
    fn test_guard_covers_nested_paths() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let session = SessionStore::open(dir.path().to_path_buf());
        let navigator = Navigator::new();
        let routes = vec![
            Route::protected("/projects", "projects"),
            Route::new(LOGIN_PATH, "login"),
        ];
        let router = Router::new(routes, session.clone(), navigator.clone());

        let outcome = router.navigate("/projects/665f1a2b9c");
        assert_eq!(
            outcome,
            NavigationOutcome::Redirected {
                to: LOGIN_PATH.to_string()
            }
        );

        login(&session);
        assert_eq!(
            router.navigate("/projects/665f1a2b9c"),
            NavigationOutcome::Allowed
        );
        assert_eq!(navigator.current(), "/projects/665f1a2b9c");
    }

    #[test]
    fn test_unmatched_path_is_allowed() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (router, _session, navigator) = router_in(&dir);

        // No route claims /about, so nothing requires auth.
        assert_eq!(router.navigate("/about"), NavigationOutcome::Allowed);
        assert_eq!(navigator.current(), "/about");
    }

    #[test]
    fn test_logout_reinstates_the_guard() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (router, session, _navigator) = router_in(&dir);
        login(&session);
        assert_eq!(router.navigate("/"), NavigationOutcome::Allowed);

        session.clear();
        assert_eq!(
            router.navigate("/"),
            NavigationOutcome::Redirected {
                to: LOGIN_PATH.to_string()
            }
        );
    }
}
