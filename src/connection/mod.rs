//! Connection Management
//!
//! Server profiles for the settings console.

mod config;

pub use config::*;
