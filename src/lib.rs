//! Authentication Settings Console Library
//!
//! Editing session for a server's authentication configurations: load the
//! current setup, reorder and edit it locally, then save the changes in one
//! request.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod connection;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod i18n;
pub mod services;
pub mod state;
