//! Debounce guards for click and tap events
//!
//! A guard remembers when it last accepted an event and rejects anything that
//! arrives less than a minimum interval later. Each guard owns its state:
//! widgets that should debounce together share one guard explicitly through
//! [`SharedDebounceGuard`]; there is no process-wide guard.
//!
//! [`DebounceGuard`] and [`SharedDebounceGuard`] assume the host's single UI
//! thread and are `!Sync`. [`AtomicDebounceGuard`] is the variant for callers
//! that genuinely race.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::clock::{Clock, Timestamp};

/// Interval used when the caller does not configure one
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Whether an event at `now` clears `min_interval` after `last`
fn clears_interval(last: Option<Timestamp>, now: Timestamp, min_interval: Duration) -> bool {
    match last {
        None => true,
        // `now` before `last` is rejected so `last` never decreases
        Some(last) => now
            .checked_since(last)
            .is_some_and(|elapsed| elapsed >= min_interval),
    }
}

/// Single-threaded debounce guard
#[derive(Debug)]
pub struct DebounceGuard {
    /// Last accepted event (`None` until the first accept)
    last_accepted: Cell<Option<Timestamp>>,
    /// Interval used by [`accept`](Self::accept) and [`check`](Self::check)
    min_interval: Duration,
}

impl Default for DebounceGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceGuard {
    /// Create a guard with the default 500ms interval
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_MIN_INTERVAL)
    }

    /// Create a guard with a custom default interval
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            last_accepted: Cell::new(None),
            min_interval,
        }
    }

    /// The interval used when none is passed explicitly
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Last accepted event, if any
    pub fn last_accepted(&self) -> Option<Timestamp> {
        self.last_accepted.get()
    }

    /// Accept the event at `now` if at least `min_interval` has passed since
    /// the previous accepted event
    ///
    /// Accepting records `now`; rejecting leaves the guard untouched.
    pub fn should_accept(&self, now: Timestamp, min_interval: Duration) -> bool {
        let last = self.last_accepted.get();
        if clears_interval(last, now, min_interval) {
            self.last_accepted.set(Some(now));
            true
        } else {
            tracing::trace!(
                now = now.as_millis(),
                last = last.map(Timestamp::as_millis),
                "debounce: event rejected"
            );
            false
        }
    }

    /// [`should_accept`](Self::should_accept) with the guard's own interval
    pub fn accept(&self, now: Timestamp) -> bool {
        self.should_accept(now, self.min_interval)
    }

    /// Read `clock` and [`accept`](Self::accept) at that time
    pub fn check(&self, clock: &impl Clock) -> bool {
        self.accept(clock.now())
    }

    /// Forget the last accepted event
    pub fn reset(&self) {
        self.last_accepted.set(None);
    }
}

/// A guard deliberately shared by several widgets
///
/// Cloning shares the state: an accepted click on one widget suppresses a
/// click on any other widget holding a clone for the next interval.
#[derive(Clone, Debug, Default)]
pub struct SharedDebounceGuard {
    inner: Rc<DebounceGuard>,
}

impl SharedDebounceGuard {
    pub fn new(guard: DebounceGuard) -> Self {
        Self {
            inner: Rc::new(guard),
        }
    }
}

impl std::ops::Deref for SharedDebounceGuard {
    type Target = DebounceGuard;

    fn deref(&self) -> &DebounceGuard {
        &self.inner
    }
}

/// Lock-free guard for multi-threaded callers
///
/// Accepting is a compare-and-swap on the stored timestamp, so two threads
/// racing with the same `now` accept exactly one event.
#[derive(Debug)]
pub struct AtomicDebounceGuard {
    /// Last accepted timestamp plus one; zero means nothing accepted yet.
    /// Exact for every timestamp up to [`Timestamp::MAX`].
    last_accepted: AtomicU64,
    min_interval: Duration,
}

impl Default for AtomicDebounceGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomicDebounceGuard {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_MIN_INTERVAL)
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            last_accepted: AtomicU64::new(0),
            min_interval,
        }
    }

    fn decode(raw: u64) -> Option<Timestamp> {
        raw.checked_sub(1).map(Timestamp::from_millis)
    }

    /// Last accepted event, if any
    pub fn last_accepted(&self) -> Option<Timestamp> {
        Self::decode(self.last_accepted.load(Ordering::Acquire))
    }

    /// Thread-safe [`DebounceGuard::should_accept`]
    pub fn should_accept(&self, now: Timestamp, min_interval: Duration) -> bool {
        let encoded = now.as_millis() + 1;
        let mut current = self.last_accepted.load(Ordering::Acquire);
        loop {
            if !clears_interval(Self::decode(current), now, min_interval) {
                return false;
            }
            match self.last_accepted.compare_exchange_weak(
                current,
                encoded,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    /// [`should_accept`](Self::should_accept) with the guard's own interval
    pub fn accept(&self, now: Timestamp) -> bool {
        self.should_accept(now, self.min_interval)
    }
}
