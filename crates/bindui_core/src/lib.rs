//! bindui Core
//!
//! Small stateful primitives that sit next to a host UI framework's screen
//! lifecycle:
//!
//! - **Lazy Bindings**: construct a screen's binding on first use, exactly once
//! - **Debounce Guards**: drop interaction events that arrive too close together
//! - **Clock Sources**: monotonic millisecond timestamps for the guards
//!
//! # Example
//!
//! ```rust
//! use bindui_core::binding::acquire;
//! use bindui_core::clock::Timestamp;
//! use bindui_core::debounce::DebounceGuard;
//! use std::time::Duration;
//!
//! let binding = acquire(|| vec!["title", "submit"]);
//! assert_eq!(binding.get().unwrap().len(), 2);
//!
//! let guard = DebounceGuard::new();
//! let interval = Duration::from_millis(500);
//! assert!(guard.should_accept(Timestamp::from_millis(0), interval));
//! assert!(!guard.should_accept(Timestamp::from_millis(100), interval));
//! ```

pub mod binding;
pub mod clock;
pub mod color;
pub mod debounce;
pub mod error;

pub use binding::{acquire, LazyBinding, SyncLazyBinding};
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use color::Color;
pub use debounce::{AtomicDebounceGuard, DebounceGuard, SharedDebounceGuard, DEFAULT_MIN_INTERVAL};
pub use error::{BindingError, Result};
