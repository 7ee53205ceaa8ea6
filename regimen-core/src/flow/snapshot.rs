//! Read-only views of the flow control
//!
//! The overlay reads [`ExecutionSnapshot`] every frame; the control panel
//! reads [`FlowSnapshot`] to decide which actions to offer. Both are plain
//! values rebuilt by the flow control between calls, so a reader never sees
//! a half-applied update.

use core::time::Duration;

use heapless::Vec;

use crate::program::{Catalog, Name, ProgramId, MAX_PROGRAMS};
use crate::traits::Instant;

/// Progress of the running program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSnapshot {
    /// Number of steps; zero means nothing to display
    pub step_count: usize,
    /// Name of the running (or just finished) program
    pub program_name: Name,
    /// Name of the current step
    pub current_step_name: Name,
    /// Zero-based index of the current step
    pub current_step_number: usize,
    /// Configured duration of the current step (zero if untimed)
    pub current_step_duration: Duration,
    /// Time until the current step ends
    pub time_left_in_step: Duration,
    /// Time until the whole program ends
    pub time_left_in_program: Duration,
    /// Current step only ends on an explicit skip
    pub current_step_is_untimed: bool,
    /// Program contains at least one untimed step
    pub has_untimed_steps: bool,
    /// Host or user pause is holding the program
    pub is_paused: bool,
    /// When the current step became active
    pub step_started_at: Option<Instant>,
    /// When the program last ran to completion
    pub finished_at: Option<Instant>,
}

impl ExecutionSnapshot {
    /// Snapshot left behind by a completed run
    pub fn finished(program_name: Name, at: Instant) -> Self {
        Self {
            program_name,
            finished_at: Some(at),
            ..Self::default()
        }
    }

    /// Check if there is a running program to show
    pub fn is_displayable(&self) -> bool {
        self.step_count > 0
    }

    /// Check if the current step is the final one
    pub fn is_last_step(&self) -> bool {
        self.step_count > 0 && self.current_step_number + 1 >= self.step_count
    }

    /// Check if the program finished less than `window` before `now`
    pub fn recently_finished(&self, now: Instant, window: Duration) -> bool {
        self.finished_at
            .is_some_and(|at| now >= at && now.duration_since(at) < window)
    }
}

/// One selectable program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramListing {
    /// Program identifier
    pub id: ProgramId,
    /// Title shown in the selection list
    pub title: Name,
}

/// Which control actions are currently legal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowSnapshot {
    /// Programs in catalog order
    pub programs: Vec<ProgramListing, MAX_PROGRAMS>,
    /// Catalog position of the selected program
    pub selected_index: Option<usize>,
    /// Another program may be selected
    pub switching_is_possible: bool,
    /// The selected program may be started
    pub starting_is_possible: bool,
    /// The user may pause
    pub pausing_is_possible: bool,
    /// The user may lift their own pause
    pub resuming_is_possible: bool,
    /// The run may be aborted
    pub stopping_is_possible: bool,
    /// The current step may be skipped
    pub skipping_is_possible: bool,
}

impl FlowSnapshot {
    /// Rebuild the selection list from a catalog
    pub fn list_programs(&mut self, catalog: &Catalog) {
        self.programs.clear();
        for program in catalog.iter() {
            let listing = ProgramListing {
                id: program.key().clone(),
                title: program.label().clone(),
            };
            let _ = self.programs.push(listing);
        }
    }

    /// Title of the selected program
    pub fn selected_title(&self) -> Option<&str> {
        let index = self.selected_index?;
        self.programs.get(index).map(|p| p.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Program;

    #[test]
    fn test_empty_snapshot_is_not_displayable() {
        let snapshot = ExecutionSnapshot::default();
        assert!(!snapshot.is_displayable());
        assert!(!snapshot.is_last_step());
        assert!(!snapshot.recently_finished(Instant::from_secs(1), Duration::from_secs(5)));
    }

    #[test]
    fn test_recently_finished_window() {
        let mut name = Name::new();
        name.push_str("Warmup").unwrap();
        let snapshot = ExecutionSnapshot::finished(name, Instant::from_secs(100));

        assert!(!snapshot.is_displayable());
        let window = Duration::from_secs(5);
        assert!(snapshot.recently_finished(Instant::from_secs(100), window));
        assert!(snapshot.recently_finished(Instant::from_secs(104), window));
        assert!(!snapshot.recently_finished(Instant::from_secs(105), window));
    }

    #[test]
    fn test_listing_follows_catalog_order() {
        let catalog = Catalog::from_programs([
            Program::new("b", "Bravo").unwrap(),
            Program::new("a", "Alpha").unwrap(),
        ])
        .unwrap();

        let mut flow = FlowSnapshot::default();
        flow.list_programs(&catalog);
        flow.selected_index = Some(1);

        assert_eq!(flow.programs.len(), 2);
        assert_eq!(flow.programs[0].id.as_str(), "b");
        assert_eq!(flow.selected_title(), Some("Alpha"));
    }
}
