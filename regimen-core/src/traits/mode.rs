//! Game mode switch trait
//!
//! Stepping into a new entry may require the host to load a different game
//! mode. The flow control only states the intent; the host performs the
//! switch.

/// Game mode a step needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeTarget<'a> {
    /// Freeplay
    Freeplay,
    /// Custom training, identified by pack code
    TrainingPack(&'a str),
    /// Workshop map, identified by path
    WorkshopMap(&'a str),
}

/// Trait for the host's game mode switcher
pub trait GameModeSwitch {
    /// Check whether the host is already in `target`
    fn is_active(&self, target: &ModeTarget<'_>) -> bool;

    /// Ask the host to load `target`
    ///
    /// Called synchronously from the flow control; implementations should
    /// queue the work rather than block.
    fn switch_to(&mut self, target: &ModeTarget<'_>);
}

/// No switcher; every mode counts as already active
impl GameModeSwitch for () {
    fn is_active(&self, _target: &ModeTarget<'_>) -> bool {
        true
    }

    fn switch_to(&mut self, _target: &ModeTarget<'_>) {}
}

impl<T: GameModeSwitch + ?Sized> GameModeSwitch for &mut T {
    fn is_active(&self, target: &ModeTarget<'_>) -> bool {
        (**self).is_active(target)
    }

    fn switch_to(&mut self, target: &ModeTarget<'_>) {
        (**self).switch_to(target)
    }
}
