//! AppEvent - Application Event Enum
//!
//! All events the controller sends to the view layer.

use chrono::{DateTime, Local};

use crate::app::navigation::Destination;
use crate::state::notice_state::NoticeLevel;

/// Controller -> view events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Message for the administrator
    Notice {
        level: NoticeLevel,
        message: String,
        timestamp: DateTime<Local>,
    },

    /// Initial state finished loading
    Loaded {
        can_edit: bool,
    },

    /// The unsaved-changes flag flipped
    DirtyChanged {
        dirty: bool,
    },

    /// The view should leave the page
    Navigate {
        destination: Destination,
    },
}

impl AppEvent {
    /// Create a notice event with current timestamp
    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self::Notice {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Create an info notice
    pub fn info(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Info, message)
    }

    /// Create a warning notice
    pub fn warn(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Warn, message)
    }

    /// Create an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Error, message)
    }

    /// Whether this is an error notice
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Notice {
                level: NoticeLevel::Error,
                ..
            }
        )
    }
}
