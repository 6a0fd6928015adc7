//! Navigation - Leaving the Settings Page
//!
//! Where the page goes after save/cancel, and the guard that warns before
//! leaving with unsaved changes.

use serde::{Deserialize, Serialize};

use crate::constants::{ADMIN_CONTROLLER, SHOW_ADMIN_ACTION};

/// Pages the settings screen can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Destination {
    /// Admin console landing page
    #[default]
    AdminConsole,
}

impl Destination {
    /// Server controller and action for the page
    pub fn route(&self) -> (&'static str, &'static str) {
        match self {
            Destination::AdminConsole => (ADMIN_CONTROLLER, SHOW_ADMIN_ACTION),
        }
    }

    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            Destination::AdminConsole => "navigation.admin_console",
        }
    }
}

/// Warn-before-leave interceptor
///
/// Armed when the page mounts; disarmed right before an explicit save so a
/// successful save can navigate away without a prompt.
#[derive(Debug, Clone)]
pub struct LeaveGuard {
    armed: bool,
}

impl LeaveGuard {
    /// Create an armed guard
    pub fn new() -> Self {
        Self { armed: true }
    }

    /// Whether the guard is active
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Stop intercepting navigation
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Start intercepting navigation again
    pub fn rearm(&mut self) {
        self.armed = true;
    }

    /// Whether leaving now should prompt the user
    pub fn should_warn(&self, dirty: bool) -> bool {
        self.is_armed() && dirty
    }
}

impl Default for LeaveGuard {
    fn default() -> Self {
        Self::new()
    }
}
