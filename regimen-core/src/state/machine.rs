//! Flow state machine definition
//!
//! The program lifecycle is a function of the current state and a trigger.
//! Side effects (timing, snapshots, notifications) live in the flow control;
//! this module only decides where the lifecycle goes next.

/// Lifecycle of the selected program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowState {
    /// Nothing selected
    #[default]
    Uninitialized,
    /// Program selected, not started
    WaitingForStart,
    /// Program running, no pause source active
    Running,
    /// Paused by the user only
    OnlyProgramPaused,
    /// Paused by the host only
    OnlyGamePaused,
    /// Paused by both the host and the user
    BothPaused,
}

/// Inputs that move the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// A catalog program was selected
    Select,
    /// The selection was cleared
    Unselect,
    /// User pressed start
    Start,
    /// User aborted, or the run was invalidated
    Stop,
    /// Last timed step elapsed
    Finish,
    /// Pause flags changed
    PauseFlags {
        /// Host (game) pause
        host: bool,
        /// User (program) pause
        user: bool,
    },
}

impl FlowState {
    /// Running state for the given pause flags
    pub fn from_pause_flags(host: bool, user: bool) -> Self {
        match (host, user) {
            (false, false) => FlowState::Running,
            (true, false) => FlowState::OnlyGamePaused,
            (false, true) => FlowState::OnlyProgramPaused,
            (true, true) => FlowState::BothPaused,
        }
    }

    /// Check if a program is selected
    pub fn is_selected(&self) -> bool {
        !matches!(self, FlowState::Uninitialized)
    }

    /// Check if the selected program is running or paused
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            FlowState::Running
                | FlowState::OnlyProgramPaused
                | FlowState::OnlyGamePaused
                | FlowState::BothPaused
        )
    }

    /// Check if any pause source holds the program
    pub fn is_paused(&self) -> bool {
        matches!(
            self,
            FlowState::OnlyProgramPaused | FlowState::OnlyGamePaused | FlowState::BothPaused
        )
    }

    /// Process a trigger and return the next state
    pub fn transition(self, trigger: Trigger) -> Self {
        use FlowState::*;
        use Trigger::*;

        match (self, trigger) {
            // Selection always resets the lifecycle
            (_, Unselect) => Uninitialized,
            (_, Select) => WaitingForStart,

            (WaitingForStart, Start) => Running,

            (state, Stop) if state.is_active() => WaitingForStart,
            (Running, Finish) => WaitingForStart,

            (state, PauseFlags { host, user }) if state.is_active() => {
                FlowState::from_pause_flags(host, user)
            }

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ACTIVE: [FlowState; 4] = [
        FlowState::Running,
        FlowState::OnlyProgramPaused,
        FlowState::OnlyGamePaused,
        FlowState::BothPaused,
    ];

    #[test]
    fn test_select_start_stop() {
        let selected = FlowState::Uninitialized.transition(Trigger::Select);
        assert_eq!(selected, FlowState::WaitingForStart);

        let running = selected.transition(Trigger::Start);
        assert_eq!(running, FlowState::Running);

        let stopped = running.transition(Trigger::Stop);
        assert_eq!(stopped, FlowState::WaitingForStart);
    }

    #[test]
    fn test_start_requires_selection() {
        assert_eq!(
            FlowState::Uninitialized.transition(Trigger::Start),
            FlowState::Uninitialized
        );
        for state in ACTIVE {
            assert_eq!(state.transition(Trigger::Start), state);
        }
    }

    #[test]
    fn test_stop_from_any_active_state() {
        for state in ACTIVE {
            assert_eq!(state.transition(Trigger::Stop), FlowState::WaitingForStart);
        }
        assert_eq!(
            FlowState::Uninitialized.transition(Trigger::Stop),
            FlowState::Uninitialized
        );
    }

    #[test]
    fn test_finish_only_while_running() {
        assert_eq!(
            FlowState::Running.transition(Trigger::Finish),
            FlowState::WaitingForStart
        );
        assert_eq!(
            FlowState::BothPaused.transition(Trigger::Finish),
            FlowState::BothPaused
        );
    }

    #[test]
    fn test_unselect_from_anywhere() {
        for state in ACTIVE {
            assert_eq!(state.transition(Trigger::Unselect), FlowState::Uninitialized);
        }
    }

    #[test]
    fn test_pause_flags_ignored_when_inactive() {
        let flags = Trigger::PauseFlags {
            host: true,
            user: true,
        };
        assert_eq!(
            FlowState::WaitingForStart.transition(flags),
            FlowState::WaitingForStart
        );
    }

    #[test]
    fn test_pause_variants() {
        assert_eq!(FlowState::from_pause_flags(false, false), FlowState::Running);
        assert_eq!(FlowState::from_pause_flags(true, false), FlowState::OnlyGamePaused);
        assert_eq!(FlowState::from_pause_flags(false, true), FlowState::OnlyProgramPaused);
        assert_eq!(FlowState::from_pause_flags(true, true), FlowState::BothPaused);
        assert!(!FlowState::Running.is_paused());
        assert!(FlowState::BothPaused.is_paused());
    }

    proptest! {
        #[test]
        fn prop_pause_order_does_not_matter(flips in proptest::collection::vec(any::<bool>(), 0..32)) {
            // true flips the host flag, false flips the user flag
            let mut state = FlowState::Running;
            let (mut host, mut user) = (false, false);
            for flip_host in flips {
                if flip_host { host = !host } else { user = !user }
                state = state.transition(Trigger::PauseFlags { host, user });
            }
            prop_assert_eq!(state, FlowState::from_pause_flags(host, user));
            prop_assert_eq!(state.is_paused(), host || user);
        }
    }
}
