//! Notification trait for flow events

use crate::state::FlowEvent;

/// Trait for consumers of flow events
///
/// Called synchronously on the host update thread, after the snapshots
/// reflect the event.
pub trait Notifier {
    /// Deliver one event
    fn notify(&mut self, event: FlowEvent);
}

/// Discards every event
impl Notifier for () {
    fn notify(&mut self, _event: FlowEvent) {}
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, event: FlowEvent) {
        (**self).notify(event)
    }
}
