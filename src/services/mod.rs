//! Service Layer
//!
//! Abstraction over the settings backend and its HTTP implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   AuthSettingsController     │
//! └──────────────┬───────────────┘
//!                │ AuthBackend
//!                ▼
//! ┌──────────────────────────────┐
//! │  HttpBackend (reqwest)       │
//! │  login-initialMount.view     │
//! │  login-saveSettings.view     │
//! │  login-deleteConfiguration   │
//! └──────────────────────────────┘
//! ```

mod backend;
mod http_backend;

pub use backend::*;
pub use http_backend::*;
