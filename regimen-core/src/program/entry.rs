//! Program entries
//!
//! One entry is one step of a training program. How it completes and which
//! game mode it wants are separate sum types, so an untimed entry can never
//! carry a stray duration.

use core::time::Duration;

use heapless::String;

use super::ProgramError;
use crate::traits::ModeTarget;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum entry / program name length
pub const MAX_NAME_LEN: usize = 32;

/// Maximum training pack code length
pub const MAX_PACK_CODE_LEN: usize = 24;

/// Maximum workshop map path length
pub const MAX_MAP_PATH_LEN: usize = 96;

/// Maximum free-form notes length
pub const MAX_NOTES_LEN: usize = 64;

/// Display name of a program or entry
pub type Name = String<MAX_NAME_LEN>;

/// How a step ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Completion {
    /// Ends on its own once the duration has elapsed
    Timed(Duration),
    /// Ends only when the user skips it (e.g. after finishing a training pack)
    CompletePack,
}

impl Completion {
    /// Duration contributed to the program total
    pub fn duration(&self) -> Duration {
        match self {
            Completion::Timed(duration) => *duration,
            Completion::CompletePack => Duration::ZERO,
        }
    }

    /// Whether the step needs an explicit skip to end
    pub fn is_untimed(&self) -> bool {
        matches!(self, Completion::CompletePack)
    }
}

/// Game mode a step wants loaded when it activates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntryKind {
    /// No preference; the current mode is left alone
    #[default]
    Unspecified,
    /// Freeplay
    Freeplay,
    /// A custom training pack
    CustomTraining {
        /// Pack share code
        pack_code: String<MAX_PACK_CODE_LEN>,
    },
    /// A workshop map
    WorkshopMap {
        /// Path of the map file on the host
        map_path: String<MAX_MAP_PATH_LEN>,
    },
}

impl EntryKind {
    /// Custom training kind for the given pack code
    pub fn custom_training(pack_code: &str) -> Result<Self, ProgramError> {
        Ok(EntryKind::CustomTraining {
            pack_code: bounded(pack_code, ProgramError::PayloadTooLong)?,
        })
    }

    /// Workshop kind for the given map path
    pub fn workshop_map(map_path: &str) -> Result<Self, ProgramError> {
        Ok(EntryKind::WorkshopMap {
            map_path: bounded(map_path, ProgramError::PayloadTooLong)?,
        })
    }

    /// Mode the host has to be in for this kind, if any
    pub fn mode_target(&self) -> Option<ModeTarget<'_>> {
        match self {
            EntryKind::Unspecified => None,
            EntryKind::Freeplay => Some(ModeTarget::Freeplay),
            EntryKind::CustomTraining { pack_code } => {
                Some(ModeTarget::TrainingPack(pack_code.as_str()))
            }
            EntryKind::WorkshopMap { map_path } => Some(ModeTarget::WorkshopMap(map_path.as_str())),
        }
    }
}

/// One step of a training program
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramEntry {
    /// Step name shown in the overlay
    pub name: Name,
    /// How the step ends
    pub completion: Completion,
    /// Game mode the step wants
    pub kind: EntryKind,
    /// Free-form notes, carried through untouched
    pub notes: String<MAX_NOTES_LEN>,
}

impl ProgramEntry {
    /// A step that ends after `duration`
    pub fn timed(name: &str, duration: Duration) -> Result<Self, ProgramError> {
        Self::build(name, Completion::Timed(duration))
    }

    /// A step that ends only on an explicit skip
    pub fn complete_pack(name: &str) -> Result<Self, ProgramError> {
        Self::build(name, Completion::CompletePack)
    }

    fn build(name: &str, completion: Completion) -> Result<Self, ProgramError> {
        Ok(Self {
            name: bounded(name, ProgramError::NameTooLong)?,
            completion,
            kind: EntryKind::Unspecified,
            notes: String::new(),
        })
    }

    /// Set the game mode kind
    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: &str) -> Result<Self, ProgramError> {
        self.notes = bounded(notes, ProgramError::PayloadTooLong)?;
        Ok(self)
    }

    /// Duration contributed to the program total
    pub fn duration(&self) -> Duration {
        self.completion.duration()
    }

    /// Whether the step needs an explicit skip to end
    pub fn is_untimed(&self) -> bool {
        self.completion.is_untimed()
    }
}

/// Copy `text` into a bounded string, failing with `err` when it does not fit
pub(crate) fn bounded<const N: usize>(
    text: &str,
    err: ProgramError,
) -> Result<String<N>, ProgramError> {
    let mut out = String::new();
    out.push_str(text).map_err(|_| err)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untimed_entry_has_no_duration() {
        let entry = ProgramEntry::complete_pack("Aerial pack").unwrap();
        assert!(entry.is_untimed());
        assert_eq!(entry.duration(), Duration::ZERO);
    }

    #[test]
    fn test_name_too_long() {
        let long = "a name that is much longer than thirty-two bytes";
        assert_eq!(
            ProgramEntry::timed(long, Duration::from_secs(1)),
            Err(ProgramError::NameTooLong)
        );
    }

    #[test]
    fn test_mode_target_from_kind() {
        assert_eq!(EntryKind::Unspecified.mode_target(), None);
        assert_eq!(EntryKind::Freeplay.mode_target(), Some(ModeTarget::Freeplay));

        let pack = EntryKind::custom_training("A503-264C-A7EB-D282").unwrap();
        assert_eq!(
            pack.mode_target(),
            Some(ModeTarget::TrainingPack("A503-264C-A7EB-D282"))
        );

        let map = EntryKind::workshop_map("maps/obstacle_course.udk").unwrap();
        assert_eq!(
            map.mode_target(),
            Some(ModeTarget::WorkshopMap("maps/obstacle_course.udk"))
        );
    }

    #[test]
    fn test_notes_are_kept() {
        let entry = ProgramEntry::timed("Dribble", Duration::from_secs(90))
            .unwrap()
            .with_kind(EntryKind::Freeplay)
            .with_notes("keep the ball low")
            .unwrap();
        assert_eq!(entry.notes.as_str(), "keep the ball low");
        assert_eq!(entry.kind, EntryKind::Freeplay);
    }
}
