//! Training program data model
//!
//! Programs and the catalog are built and edited outside the flow control.
//! Validation happens here, at construction time, so the flow control only
//! ever sees well-formed values.

pub mod catalog;
pub mod entry;

use core::time::Duration;

use heapless::{String, Vec};

pub use catalog::{Catalog, CatalogError, MAX_PROGRAMS};
pub use entry::{
    Completion, EntryKind, Name, ProgramEntry, MAX_MAP_PATH_LEN, MAX_NAME_LEN, MAX_NOTES_LEN,
    MAX_PACK_CODE_LEN,
};

use entry::bounded;

/// Maximum program identifier length (fits a hyphenated UUID)
pub const MAX_ID_LEN: usize = 40;

/// Maximum entries per program
pub const MAX_ENTRIES: usize = 24;

/// Opaque program identifier
pub type ProgramId = String<MAX_ID_LEN>;

/// Errors raised while building programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// Identifier longer than [`MAX_ID_LEN`]
    IdTooLong,
    /// Name longer than [`MAX_NAME_LEN`]
    NameTooLong,
    /// Pack code, map path or notes exceed their limit
    PayloadTooLong,
    /// More than [`MAX_ENTRIES`] entries
    TooManyEntries,
    /// Timed entries add up past `Duration::MAX`
    DurationOverflow,
}

/// A named, ordered list of entries
///
/// `duration` and `has_untimed_steps` are derived from the entries and kept
/// in sync by every method that touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    id: ProgramId,
    name: Name,
    entries: Vec<ProgramEntry, MAX_ENTRIES>,
    duration: Duration,
    has_untimed_steps: bool,
    /// Advisory; editors refuse to modify read-only programs
    pub read_only: bool,
}

impl Program {
    /// Create an empty program
    pub fn new(id: &str, name: &str) -> Result<Self, ProgramError> {
        Ok(Self {
            id: bounded(id, ProgramError::IdTooLong)?,
            name: bounded(name, ProgramError::NameTooLong)?,
            entries: Vec::new(),
            duration: Duration::ZERO,
            has_untimed_steps: false,
            read_only: false,
        })
    }

    /// Create a program from a list of entries
    pub fn with_entries(
        id: &str,
        name: &str,
        entries: &[ProgramEntry],
    ) -> Result<Self, ProgramError> {
        let mut program = Self::new(id, name)?;
        program.set_entries(entries)?;
        Ok(program)
    }

    /// Program identifier
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Program name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn key(&self) -> &ProgramId {
        &self.id
    }

    pub(crate) fn label(&self) -> &Name {
        &self.name
    }

    /// Rename the program
    pub fn rename(&mut self, name: &str) -> Result<(), ProgramError> {
        self.name = bounded(name, ProgramError::NameTooLong)?;
        Ok(())
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    /// Sum of all timed entry durations
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether any entry ends only on an explicit skip
    pub fn has_untimed_steps(&self) -> bool {
        self.has_untimed_steps
    }

    /// Append an entry
    ///
    /// On error the program is left unchanged.
    pub fn push_entry(&mut self, entry: ProgramEntry) -> Result<(), ProgramError> {
        let duration = self
            .duration
            .checked_add(entry.duration())
            .ok_or(ProgramError::DurationOverflow)?;
        let untimed = entry.is_untimed();
        self.entries
            .push(entry)
            .map_err(|_| ProgramError::TooManyEntries)?;
        self.duration = duration;
        self.has_untimed_steps |= untimed;
        Ok(())
    }

    /// Replace all entries
    ///
    /// On error the program keeps its previous entries.
    pub fn set_entries(&mut self, entries: &[ProgramEntry]) -> Result<(), ProgramError> {
        if entries.len() > MAX_ENTRIES {
            return Err(ProgramError::TooManyEntries);
        }
        let duration = total_duration(entries)?;
        self.entries.clear();
        for entry in entries {
            self.entries
                .push(entry.clone())
                .map_err(|_| ProgramError::TooManyEntries)?;
        }
        self.duration = duration;
        self.has_untimed_steps = entries.iter().any(ProgramEntry::is_untimed);
        Ok(())
    }

    /// Remove the entry at `index`, if present
    pub fn remove_entry(&mut self, index: usize) -> Option<ProgramEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        // A subset of a sum that fit still fits
        self.duration = self.duration.saturating_sub(removed.duration());
        self.has_untimed_steps = self.entries.iter().any(ProgramEntry::is_untimed);
        Some(removed)
    }
}

/// Sum of the timed entry durations, `DurationOverflow` if it does not fit
fn total_duration(entries: &[ProgramEntry]) -> Result<Duration, ProgramError> {
    entries
        .iter()
        .map(ProgramEntry::duration)
        .try_fold(Duration::ZERO, Duration::checked_add)
        .ok_or(ProgramError::DurationOverflow)
}
