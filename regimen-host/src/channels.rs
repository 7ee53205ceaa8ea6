//! Event forwarding
//!
//! Hosts usually render on a different code path than the one driving the
//! flow control. [`ChannelNotifier`] forwards every flow event into an
//! `mpsc` channel the UI side drains at its own pace.

use std::sync::mpsc::{self, Receiver, Sender};

use regimen_core::state::FlowEvent;
use regimen_core::traits::Notifier;

/// Notifier that sends events into a channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<FlowEvent>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel
    pub fn channel() -> (Self, Receiver<FlowEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&mut self, event: FlowEvent) {
        // A dropped receiver only means nobody listens any more
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (mut notifier, rx) = ChannelNotifier::channel();
        notifier.notify(FlowEvent::ProgramStarted);
        notifier.notify(FlowEvent::StepActivated { index: 0 });

        assert_eq!(rx.try_recv(), Ok(FlowEvent::ProgramStarted));
        assert_eq!(rx.try_recv(), Ok(FlowEvent::StepActivated { index: 0 }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (mut notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        notifier.notify(FlowEvent::ProgramStopped);
    }
}
