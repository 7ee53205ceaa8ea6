//! Events emitted by the flow control

/// Domain events delivered to the injected notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowEvent {
    /// A program was selected; `index` is its catalog position
    ProgramSelected { index: usize },
    /// The selection was cleared
    ProgramUnselected,
    /// The selected program started
    ProgramStarted,
    /// A step became current
    StepActivated { index: usize },
    /// The program became paused
    Paused { host: bool, user: bool },
    /// The program resumed after a pause
    Resumed,
    /// The last step elapsed
    ProgramFinished,
    /// The run was aborted
    ProgramStopped,
    /// A new catalog replaced the previous one
    CatalogReplaced { programs: usize },
}

impl FlowEvent {
    /// Check if this event ends a run
    pub fn ends_run(&self) -> bool {
        matches!(self, FlowEvent::ProgramFinished | FlowEvent::ProgramStopped)
    }

    /// Check if this event changes what the overlay shows
    pub fn affects_overlay(&self) -> bool {
        !matches!(
            self,
            FlowEvent::ProgramSelected { .. } | FlowEvent::CatalogReplaced { .. }
        )
    }
}
