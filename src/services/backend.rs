//! Backend contract
//!
//! The controller only ever talks to the server through this trait, so the
//! HTTP client can be swapped for an in-memory fake in tests.

use std::future::Future;

use crate::domain::{InitialState, SaveRequest};
use crate::error::Result;

/// Read/write endpoints of the authentication settings backend
pub trait AuthBackend {
    /// Fetch configurations, providers, settings and permissions
    fn fetch_initial_state(&self) -> impl Future<Output = Result<InitialState>> + Send;

    /// Persist changed orderings and the full global settings
    fn save_settings(&self, request: &SaveRequest) -> impl Future<Output = Result<()>> + Send;

    /// Delete one configuration
    fn delete_configuration(&self, configuration: i64) -> impl Future<Output = Result<()>> + Send;
}
