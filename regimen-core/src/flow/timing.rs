//! Step boundary table
//!
//! Built once when a program starts. Each slot holds the cumulative offset,
//! from program start, at which that step ends. Untimed steps add nothing,
//! so their slot repeats the previous offset and is never compared against
//! elapsed time.

use core::time::Duration;

use heapless::Vec;

use crate::program::{ProgramEntry, MAX_ENTRIES};

/// Cumulative step end offsets for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTable {
    ends: Vec<Duration, MAX_ENTRIES>,
}

impl StepTable {
    /// Precompute end offsets for `entries`
    pub fn build(entries: &[ProgramEntry]) -> Self {
        let mut ends = Vec::new();
        let mut offset = Duration::ZERO;
        for entry in entries.iter().take(MAX_ENTRIES) {
            offset = offset.saturating_add(entry.duration());
            let _ = ends.push(offset);
        }
        Self { ends }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the table describes an empty program
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Check if `index` is the final step
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.ends.len()
    }

    /// Offset at which step `index` ends
    pub fn end_of(&self, index: usize) -> Option<Duration> {
        self.ends.get(index).copied()
    }

    /// Offset at which step `index` starts
    pub fn start_of(&self, index: usize) -> Duration {
        match index.checked_sub(1) {
            Some(previous) => self.end_of(previous).unwrap_or_else(|| self.total()),
            None => Duration::ZERO,
        }
    }

    /// Timed length of the whole program
    pub fn total(&self) -> Duration {
        self.ends.last().copied().unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_cumulative_offsets() {
        let table = StepTable::build(&[
            ProgramEntry::timed("A", secs(60)).unwrap(),
            ProgramEntry::timed("B", secs(120)).unwrap(),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.end_of(0), Some(secs(60)));
        assert_eq!(table.end_of(1), Some(secs(180)));
        assert_eq!(table.start_of(0), Duration::ZERO);
        assert_eq!(table.start_of(1), secs(60));
        assert_eq!(table.total(), secs(180));
        assert!(table.is_last(1));
        assert!(!table.is_last(0));
    }

    #[test]
    fn test_untimed_slots_repeat_previous_offset() {
        let table = StepTable::build(&[
            ProgramEntry::timed("A", secs(30)).unwrap(),
            ProgramEntry::complete_pack("Pack").unwrap(),
            ProgramEntry::timed("B", secs(30)).unwrap(),
        ]);

        assert_eq!(table.end_of(1), Some(secs(30)));
        assert_eq!(table.start_of(2), secs(30));
        assert_eq!(table.total(), secs(60));
    }

    #[test]
    fn test_empty_program() {
        let table = StepTable::build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), Duration::ZERO);
        assert_eq!(table.end_of(0), None);
    }
}
