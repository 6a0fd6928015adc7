//! Eventing - Controller to View Messages

pub mod app_event;

pub use app_event::AppEvent;

/// Sending half of the event channel
pub type EventSender = crossbeam_channel::Sender<AppEvent>;
/// Receiving half of the event channel
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;

/// Create an unbounded event channel
pub fn channel() -> (EventSender, EventReceiver) {
    crossbeam_channel::unbounded()
}
