//! Training program flow control
//!
//! Owns the lifecycle of the selected program: selection, start, step
//! timing, the two independent pause sources, finish and stop. Everything
//! runs synchronously on the host update thread; no call blocks and none
//! fails. Invalid requests leave the state untouched or fall back to a safe
//! one.
//!
//! Elapsed time is measured from a reference instant. When a pause ends the
//! reference moves forward by the pause length, so step boundaries behave as
//! if the pause never happened.

use core::time::Duration;

use super::snapshot::{ExecutionSnapshot, FlowSnapshot};
use super::timing::StepTable;
use crate::config::FlowSettings;
use crate::program::{Catalog, ProgramId};
use crate::state::{FlowEvent, FlowState, Trigger};
use crate::traits::{Clock, GameModeSwitch, Instant, Notifier};

/// How a step activation treats the elapsed-time reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    /// Keep the reference; overshoot past the boundary carries over
    Carry,
    /// Restart the reference so elapsed time equals the step's start offset
    Realign,
}

/// Flow control for one selected training program
pub struct FlowControl<C, M = (), N = ()> {
    clock: C,
    modes: M,
    notifier: N,
    settings: FlowSettings,
    /// Last catalog received
    catalog: Catalog,
    /// Selected program id
    selected: Option<ProgramId>,
    /// Current step index
    step: Option<usize>,
    /// Lifecycle state
    state: FlowState,
    /// Raw host pause flag
    host_paused: bool,
    /// Raw user pause flag
    user_paused: bool,
    /// Instant at which `elapsed_at_reference` was valid
    reference: Instant,
    /// Program time already elapsed at `reference`
    elapsed_at_reference: Duration,
    /// Start of the ongoing pause
    pause_started_at: Option<Instant>,
    /// Step boundaries of the current run
    steps: StepTable,
    execution: ExecutionSnapshot,
    flow: FlowSnapshot,
}

impl<C: Clock, M: GameModeSwitch, N: Notifier> FlowControl<C, M, N> {
    /// Create a flow control with an empty catalog
    pub fn new(clock: C, modes: M, notifier: N, settings: FlowSettings) -> Self {
        Self {
            clock,
            modes,
            notifier,
            settings,
            catalog: Catalog::new(),
            selected: None,
            step: None,
            state: FlowState::Uninitialized,
            host_paused: false,
            user_paused: false,
            reference: Instant::ZERO,
            elapsed_at_reference: Duration::ZERO,
            pause_started_at: None,
            steps: StepTable::default(),
            execution: ExecutionSnapshot::default(),
            flow: FlowSnapshot::default(),
        }
    }

    /// Snapshot for the overlay
    pub fn execution_snapshot(&self) -> &ExecutionSnapshot {
        &self.execution
    }

    /// Snapshot for the control panel
    pub fn flow_snapshot(&self) -> &FlowSnapshot {
        &self.flow
    }

    /// Get current lifecycle state
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Get the selected program id
    pub fn selected_program(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Get the current step index (if running)
    pub fn current_step(&self) -> Option<usize> {
        self.step
    }

    /// Raw host pause flag
    pub fn host_paused(&self) -> bool {
        self.host_paused
    }

    /// Raw user pause flag
    pub fn user_paused(&self) -> bool {
        self.user_paused
    }

    /// Catalog the flow control currently works from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current settings
    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Injected notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Replace the settings
    ///
    /// Pause state is reconciled again, since `follow_host_pause` may change
    /// what the host flag means.
    pub fn update_settings(&mut self, settings: FlowSettings) {
        self.settings = settings;
        self.reconcile_pause();
    }

    /// Select a program by id
    ///
    /// Any active run is stopped first. An id missing from the catalog
    /// clears the selection instead.
    pub fn select_program(&mut self, id: &str) {
        self.stop_running_program();

        let Some(index) = self.catalog.position(id) else {
            self.unselect_program();
            return;
        };

        self.selected = self.catalog.get(id).map(|program| program.key().clone());
        self.step = None;
        // A fresh selection never inherits a pause pressed before it
        self.user_paused = false;
        self.state = self.state.transition(Trigger::Select);
        self.execution = ExecutionSnapshot::default();
        self.flow.selected_index = Some(index);
        self.refresh_flow();

        #[cfg(feature = "defmt")]
        defmt::info!("program selected: {} (index {})", id, index);
        self.notifier.notify(FlowEvent::ProgramSelected { index });
    }

    /// Clear the selection
    pub fn unselect_program(&mut self) {
        let was_selected = self.selected.is_some() || self.state.is_selected();

        self.clear_run();
        self.selected = None;
        self.state = self.state.transition(Trigger::Unselect);
        self.execution = ExecutionSnapshot::default();
        self.flow.selected_index = None;
        self.refresh_flow();

        if was_selected {
            #[cfg(feature = "defmt")]
            defmt::info!("program unselected");
            self.notifier.notify(FlowEvent::ProgramUnselected);
        }
    }

    /// Start the selected program
    ///
    /// Does nothing unless a program is selected and waiting for start.
    pub fn start_selected_program(&mut self) {
        if self.state != FlowState::WaitingForStart {
            return;
        }
        let Some(program) = self.selected.as_deref().and_then(|id| self.catalog.get(id)) else {
            self.unselect_program();
            return;
        };

        // Entries may have been edited since selection
        self.steps = StepTable::build(program.entries());
        self.execution = ExecutionSnapshot {
            step_count: self.steps.len(),
            program_name: program.label().clone(),
            has_untimed_steps: program.has_untimed_steps(),
            time_left_in_program: self.steps.total(),
            ..ExecutionSnapshot::default()
        };

        let now = self.clock.now();
        self.reference = now;
        self.elapsed_at_reference = Duration::ZERO;
        self.pause_started_at = None;
        self.step = None;
        self.state = self.state.transition(Trigger::Start);

        self.activate(now, Alignment::Realign);
        if !self.state.is_active() {
            // Empty program; activation already unselected it
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "program started: {} steps, {} s",
            self.steps.len(),
            self.steps.total().as_secs()
        );
        self.notifier.notify(FlowEvent::ProgramStarted);

        // Host may already be paused
        self.reconcile_pause();
        self.refresh_flow();
    }

    /// Advance to the next step
    ///
    /// This is the explicit "skip" action, and the only way an untimed step
    /// ends. Does nothing while paused, inactive, or on the last step.
    pub fn activate_next_step(&mut self) {
        if self.state != FlowState::Running {
            return;
        }
        if self.step.is_some_and(|index| self.steps.is_last(index)) {
            return;
        }
        let now = self.clock.now();
        self.activate(now, Alignment::Realign);
        self.refresh_flow();
    }

    /// User pause
    pub fn pause_program(&mut self) {
        self.user_paused = true;
        self.reconcile_pause();
    }

    /// Lift the user pause
    pub fn resume_program(&mut self) {
        self.user_paused = false;
        self.reconcile_pause();
    }

    /// Host entered its pause state
    pub fn handle_host_pause_start(&mut self) {
        self.host_paused = true;
        self.reconcile_pause();
    }

    /// Host left its pause state
    pub fn handle_host_pause_end(&mut self) {
        self.host_paused = false;
        self.reconcile_pause();
    }

    /// Per-frame update
    ///
    /// Called at frame rate; does no work unless a timed step is running.
    pub fn handle_timer_tick(&mut self) {
        if self.state != FlowState::Running {
            return;
        }
        let Some(index) = self.step else {
            return;
        };
        if self.execution.current_step_is_untimed {
            return;
        }
        let Some(threshold) = self.steps.end_of(index) else {
            return;
        };

        let now = self.clock.now();
        let elapsed = self.elapsed(now);

        if elapsed >= threshold {
            if self.steps.is_last(index) {
                self.finish_running_program(now);
            } else {
                self.activate(now, Alignment::Carry);
                self.refresh_flow();
            }
            return;
        }

        self.execution.time_left_in_step = threshold.saturating_sub(elapsed);
        self.execution.time_left_in_program = self.steps.total().saturating_sub(elapsed);
    }

    /// Abort the active run
    ///
    /// The program stays selected. Does nothing when no run is active.
    pub fn stop_running_program(&mut self) {
        if !self.state.is_active() {
            return;
        }

        self.clear_run();
        self.state = self.state.transition(Trigger::Stop);
        self.execution = ExecutionSnapshot::default();
        self.refresh_flow();

        #[cfg(feature = "defmt")]
        defmt::info!("program stopped");
        self.notifier.notify(FlowEvent::ProgramStopped);
    }

    /// Replace the catalog
    ///
    /// A changed catalog may no longer match the running program's steps,
    /// so any active run is stopped first.
    pub fn receive_catalog_snapshot(&mut self, catalog: Catalog) {
        self.stop_running_program();
        self.catalog = catalog;
        self.flow.list_programs(&self.catalog);

        let position = self
            .selected
            .as_deref()
            .map(|id| self.catalog.position(id));
        match position {
            Some(Some(index)) => self.flow.selected_index = Some(index),
            Some(None) => self.unselect_program(),
            None => self.flow.selected_index = None,
        }
        self.refresh_flow();

        #[cfg(feature = "defmt")]
        defmt::debug!("catalog replaced: {} programs", self.catalog.len());
        self.notifier.notify(FlowEvent::CatalogReplaced {
            programs: self.catalog.len(),
        });
    }

    /// Make the next step current
    fn activate(&mut self, now: Instant, alignment: Alignment) {
        if self.steps.is_empty() {
            // An empty program cannot run
            self.unselect_program();
            return;
        }
        let next = match self.step {
            None => 0,
            Some(index) if !self.steps.is_last(index) => index + 1,
            Some(_) => return,
        };
        let Some(entry) = self
            .selected
            .as_deref()
            .and_then(|id| self.catalog.get(id))
            .and_then(|program| program.entries().get(next))
        else {
            return;
        };

        let start_offset = self.steps.start_of(next);
        if alignment == Alignment::Realign {
            self.reference = now;
            self.elapsed_at_reference = start_offset;
        }

        let duration = entry.duration();
        self.step = Some(next);
        self.execution.current_step_number = next;
        self.execution.current_step_name = entry.name.clone();
        self.execution.current_step_duration = duration;
        self.execution.time_left_in_step = duration;
        self.execution.time_left_in_program = self.steps.total().saturating_sub(start_offset);
        self.execution.current_step_is_untimed = entry.is_untimed();
        self.execution.step_started_at = Some(now);

        if self.settings.switch_game_mode {
            if let Some(target) = entry.kind.mode_target() {
                if !self.modes.is_active(&target) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("requesting mode switch: {}", target);
                    self.modes.switch_to(&target);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("step {} activated", next);
        self.notifier.notify(FlowEvent::StepActivated { index: next });
    }

    /// Record a completed run
    fn finish_running_program(&mut self, now: Instant) {
        if self.state != FlowState::Running {
            return;
        }

        let program_name = self.execution.program_name.clone();
        self.clear_run();
        self.state = self.state.transition(Trigger::Finish);
        self.execution = ExecutionSnapshot::finished(program_name, now);
        self.refresh_flow();

        #[cfg(feature = "defmt")]
        defmt::info!("program finished");
        self.notifier.notify(FlowEvent::ProgramFinished);
    }

    /// Bring the lifecycle in line with the pause flags
    fn reconcile_pause(&mut self) {
        if !self.state.is_active() {
            self.refresh_flow();
            return;
        }

        let host = self.host_paused && self.settings.follow_host_pause;
        let user = self.user_paused;
        let previous = self.state;
        self.state = previous.transition(Trigger::PauseFlags { host, user });

        if self.state != previous {
            let now = self.clock.now();
            match (previous.is_paused(), self.state.is_paused()) {
                (false, true) => {
                    if self.pause_started_at.is_none() {
                        self.pause_started_at = Some(now);
                    }
                }
                (true, false) => {
                    if let Some(started) = self.pause_started_at.take() {
                        let paused_for = now.duration_since(started);
                        self.reference = self.reference.checked_add(paused_for).unwrap_or(now);
                    }
                }
                _ => {}
            }

            if self.state.is_paused() {
                #[cfg(feature = "defmt")]
                defmt::debug!("paused (host: {}, user: {})", host, user);
                self.notifier.notify(FlowEvent::Paused { host, user });
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!("resumed");
                self.notifier.notify(FlowEvent::Resumed);
            }
        }

        self.execution.is_paused = self.state.is_paused();
        self.refresh_flow();
    }

    /// Program time elapsed at `now`, pauses excluded
    fn elapsed(&self, now: Instant) -> Duration {
        self.elapsed_at_reference
            .saturating_add(now.duration_since(self.reference))
    }

    /// Drop all per-run state
    ///
    /// The host pause flag is kept; it mirrors the host, not the run.
    fn clear_run(&mut self) {
        self.step = None;
        self.user_paused = false;
        self.steps = StepTable::default();
        self.pause_started_at = None;
        self.elapsed_at_reference = Duration::ZERO;
    }

    /// Recompute which control actions are legal
    fn refresh_flow(&mut self) {
        let active = self.state.is_active();
        self.flow.switching_is_possible = !self.catalog.is_empty();
        self.flow.starting_is_possible =
            self.selected.is_some() && self.state == FlowState::WaitingForStart;
        // The pause button reflects the user's own intent only
        self.flow.pausing_is_possible = active && !self.user_paused;
        self.flow.resuming_is_possible = active && self.user_paused;
        self.flow.stopping_is_possible = active;
        self.flow.skipping_is_possible = self.state == FlowState::Running
            && self.step.is_some_and(|index| !self.steps.is_last(index));
    }
}
