//! Host callback bridge
//!
//! Hosts report pause changes as a boolean on every notification, often
//! repeating the same value. The bridge turns those callbacks into the
//! flow control's start/end calls and drives the per-frame tick.

use regimen_core::flow::FlowControl;
use regimen_core::traits::{Clock, GameModeSwitch, Notifier};

/// Adapter between host callbacks and a [`FlowControl`]
pub struct HostBridge<C, M = (), N = ()> {
    flow: FlowControl<C, M, N>,
    /// Last pause value reported by the host
    host_paused: bool,
}

impl<C: Clock, M: GameModeSwitch, N: Notifier> HostBridge<C, M, N> {
    /// Wrap a flow control
    pub fn new(flow: FlowControl<C, M, N>) -> Self {
        let host_paused = flow.host_paused();
        Self { flow, host_paused }
    }

    /// Host pause state changed (or was re-reported)
    pub fn on_pause_changed(&mut self, paused: bool) {
        if paused == self.host_paused {
            return;
        }
        self.host_paused = paused;

        log::debug!("host pause changed: {}", paused);

        if paused {
            self.flow.handle_host_pause_start();
        } else {
            self.flow.handle_host_pause_end();
        }
    }

    /// Host rendered a frame
    pub fn on_frame(&mut self) {
        self.flow.handle_timer_tick();
    }

    /// Flow control, for reading snapshots
    pub fn flow(&self) -> &FlowControl<C, M, N> {
        &self.flow
    }

    /// Flow control, for issuing user actions
    pub fn flow_mut(&mut self) -> &mut FlowControl<C, M, N> {
        &mut self.flow
    }

    /// Release the flow control
    pub fn into_inner(self) -> FlowControl<C, M, N> {
        self.flow
    }
}
