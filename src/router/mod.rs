//! Client-side routing: location state and the authentication guard.
//!
//! Navigation flows through `Router::navigate`, which consults the
//! session store before allowing a transition to a protected route.
//! `Navigator` is the shared location cell; its `assign` is the single
//! hard-redirect mechanism, used by the guard's verdict and by the API
//! client when a response invalidates the session.

pub mod guard;
pub mod navigator;

pub use guard::{default_routes, NavigationOutcome, Route, Router, LOGIN_PATH};
pub use navigator::Navigator;
