//! Monotonic clock trait
//!
//! The flow control never reads time on its own. Every instant comes from
//! an injected [`Clock`], so hosts supply a monotonic source and tests
//! supply a [`ManualClock`].

use core::cell::Cell;
use core::time::Duration;

/// A point on a monotonic timeline, in microseconds from an arbitrary origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant {
    micros: u64,
}

impl Instant {
    /// The clock origin
    pub const ZERO: Instant = Instant { micros: 0 };

    /// Create an instant from microseconds since the origin
    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    /// Create an instant from milliseconds since the origin
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            micros: millis.saturating_mul(1_000),
        }
    }

    /// Create an instant from whole seconds since the origin
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            micros: secs.saturating_mul(1_000_000),
        }
    }

    /// Microseconds since the origin
    pub const fn as_micros(&self) -> u64 {
        self.micros
    }

    /// Time elapsed from `earlier` to `self`
    ///
    /// Saturates to zero when `earlier` is later than `self`.
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_micros(self.micros.saturating_sub(earlier.micros))
    }

    /// Shift this instant forward, `None` on overflow
    pub fn checked_add(&self, duration: Duration) -> Option<Instant> {
        let delta = u64::try_from(duration.as_micros()).ok()?;
        self.micros.checked_add(delta).map(Instant::from_micros)
    }
}

/// Source of monotonic time
pub trait Clock {
    /// Read the current instant
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Hand-driven clock for deterministic tests and replays
///
/// Interior mutability lets a test keep a shared reference while the
/// flow control holds another one.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Create a clock parked at the origin
    pub const fn new() -> Self {
        Self {
            now: Cell::new(Instant::ZERO),
        }
    }

    /// Create a clock parked at `start`
    pub const fn starting_at(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let next = self.now.get().checked_add(by).unwrap_or(self.now.get());
        self.now.set(next);
    }

    /// Jump to an absolute instant
    ///
    /// Requests to move backwards are ignored; the clock stays monotonic.
    pub fn set(&self, at: Instant) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_since_saturates() {
        let early = Instant::from_secs(5);
        let late = Instant::from_secs(8);
        assert_eq!(late.duration_since(early), Duration::from_secs(3));
        assert_eq!(early.duration_since(late), Duration::ZERO);
    }

    #[test]
    fn test_checked_add_overflow() {
        let edge = Instant::from_micros(u64::MAX - 1);
        assert!(edge.checked_add(Duration::from_secs(1)).is_none());
        assert_eq!(
            Instant::from_secs(1).checked_add(Duration::from_millis(500)),
            Some(Instant::from_millis(1_500))
        );
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::starting_at(Instant::from_secs(10));
        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now(), Instant::from_secs(12));

        clock.set(Instant::from_secs(4));
        assert_eq!(clock.now(), Instant::from_secs(12));

        clock.set(Instant::from_secs(20));
        assert_eq!(clock.now(), Instant::from_secs(20));
    }

    #[test]
    fn test_clock_through_reference() {
        fn read<C: Clock>(clock: C) -> Instant {
            clock.now()
        }

        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(16));
        assert_eq!(read(&clock), Instant::from_millis(16));
    }
}
