//! REST API client module for the Opsdeck backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! backend to manage projects, trigger playbook runs, and poll tasks.
//!
//! The API uses JWT bearer token authentication obtained through the
//! form-encoded token endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
