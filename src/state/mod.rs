//! State - Session State Modules
//!
//! Plain data owned by the controller (session) or the view (notices).
//! Neither talks to the backend.

pub mod notice_state;
pub mod session_state;

pub use notice_state::{Notice, NoticeLevel, NoticeState};
pub use session_state::{Baseline, DragLocation, DragResult, LoadState, SessionState};
