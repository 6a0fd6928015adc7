//! Application Layer
//!
//! Console front-end and navigation targets.

pub mod application;
pub mod navigation;
