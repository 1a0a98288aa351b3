//! Monotonic clock sources for debounce timing.
//!
//! Timestamps are milliseconds on a monotonic timeline. They are never derived
//! from wall-clock time, so adjusting the system clock cannot make a guard
//! accept or reject clicks it otherwise would not.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// A point on a monotonic millisecond timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The end of the timeline
    ///
    /// One below `u64::MAX`, so an optional timestamp still packs into a
    /// single `u64`.
    pub const MAX: Timestamp = Timestamp(u64::MAX - 1);

    /// The start of the timeline
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Saturates at [`Timestamp::MAX`]
    pub const fn from_millis(millis: u64) -> Self {
        if millis > Self::MAX.0 {
            Self::MAX
        } else {
            Self(millis)
        }
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is later than `self`
    pub fn checked_since(self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0).map(Duration::from_millis)
    }

    /// Move the timestamp forward, saturating at the end of the timeline
    pub fn advance(self, by: Duration) -> Self {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        Self::from_millis(self.0.saturating_add(millis))
    }
}

/// Source of monotonic timestamps
pub trait Clock {
    /// Current time on this clock's timeline
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Real clock: milliseconds since the first time any `MonotonicClock` was read
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        static START_TIME: OnceLock<Instant> = OnceLock::new();
        let start = START_TIME.get_or_init(Instant::now);
        let millis = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        Timestamp::from_millis(millis)
    }
}

/// Hand-driven clock for tests and replaying recorded interactions
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Create a clock positioned at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `at`. Moving backwards is ignored.
    pub fn set(&self, at: Timestamp) {
        if at >= self.now.get() {
            self.now.set(at);
        }
    }

    /// Advance by `by`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().advance(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
