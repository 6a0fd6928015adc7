//! Authentication configuration feature
//!
//! The controller owns the session; `ordering` holds the pure list helpers
//! it and the session state share.

pub mod controller;
pub mod ordering;

pub use controller::AuthSettingsController;
