//! Client core for the Opsdeck automation console.
//!
//! The Opsdeck backend owns projects, playbooks, and task execution; this
//! crate is the client-side layer an embedding shell builds on:
//!
//! - `auth`: bearer-token session state, persisted across restarts
//! - `api`: the request pipeline and typed domain calls
//! - `router`: location state and the authentication guard
//! - `models`: data structures for projects, playbooks, and tasks
//!
//! Authentication flow: `ApiClient::login` obtains a token from the
//! backend and stores it in the shared `SessionStore`; every request then
//! carries it as a bearer header. A 401 response anywhere clears the
//! session and hard-redirects the `Navigator` to the login route.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;

pub use api::{ApiClient, ApiError};
pub use app::App;
pub use auth::{SessionData, SessionStore, UserProfile};
pub use config::Config;
pub use models::{
    Project, ProjectCreate, ProjectSync, ProjectUpdate, RunPlaybookRequest, TaskHandle,
    TaskResult, TaskStatus,
};
pub use router::{default_routes, NavigationOutcome, Navigator, Route, Router, LOGIN_PATH};
