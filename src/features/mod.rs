//! Features - Page Controllers
//!
//! Each feature module contains a controller that orchestrates the backend
//! and the session state for one page.

pub mod auth_config;
