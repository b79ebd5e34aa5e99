//! Authentication module for managing the user session.
//!
//! `SessionStore` is the single source of truth for the bearer token and
//! the authentication status derived from it. The store is shared by
//! handle with the API client and the router, and the persisted copy
//! survives restarts.

pub mod session;

pub use session::{SessionData, SessionStore, UserProfile};
