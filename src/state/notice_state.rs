//! NoticeState - User-Facing Notices with Ring Buffer

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::constants::NOTICE_CAPACITY;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Outcome of a successful action
    Info,
    /// Something the administrator should know, such as a read-only session
    Warn,
    /// A failed action
    Error,
}

impl NoticeLevel {
    /// Short tag printed in front of the message
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "INFO",
            NoticeLevel::Warn => "WARN",
            NoticeLevel::Error => "ERROR",
        }
    }
}

/// A single notice shown to the administrator
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Notices waiting to be shown, oldest first
#[derive(Debug)]
pub struct NoticeState {
    entries: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
}

impl NoticeState {
    /// Create a notice buffer with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Push a new notice
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        let entry = Notice {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Push a notice with current timestamp
    pub fn push_now(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    /// Remove and return all pending notices
    pub fn drain(&mut self) -> Vec<Notice> {
        self.entries.drain(..).collect()
    }

    /// Whether nothing is waiting to be shown
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new(NOTICE_CAPACITY)
    }
}
