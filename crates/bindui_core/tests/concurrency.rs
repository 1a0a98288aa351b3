//! Integration tests for the thread-safe binding and debounce variants
//!
//! These tests verify that:
//! - `SyncLazyBinding` constructs once even when many threads race on first access
//! - `AtomicDebounceGuard` accepts exactly one of several simultaneous events
//! - The single-threaded types follow the documented screen-lifecycle scenario

use bindui_core::clock::{ManualClock, Timestamp};
use bindui_core::{AtomicDebounceGuard, DebounceGuard, LazyBinding, SyncLazyBinding};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// Test that racing first accesses run the constructor exactly once
#[test]
fn test_sync_binding_constructs_once_under_contention() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let binding = Arc::new(SyncLazyBinding::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        String::from("root")
    }));

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let binding = binding.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                binding.get().unwrap() as *const String as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

/// Test that simultaneous clicks at the same instant accept exactly once
#[test]
fn test_atomic_guard_accepts_one_of_simultaneous_events() {
    let guard = Arc::new(AtomicDebounceGuard::new());
    let accepted = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let guard = guard.clone();
            let accepted = accepted.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                if guard.accept(Timestamp::from_millis(1_000)) {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
    assert_eq!(guard.last_accepted(), Some(Timestamp::from_millis(1_000)));
}

/// Test a screen that builds its binding lazily and debounces a button
#[test]
fn test_screen_style_usage() {
    struct Screen {
        binding: LazyBinding<Vec<&'static str>>,
        submit_guard: DebounceGuard,
    }

    let screen = Screen {
        binding: LazyBinding::new(|| vec!["title", "submit"]),
        submit_guard: DebounceGuard::new(),
    };
    let clock = ManualClock::new(Timestamp::zero());

    // "created": nothing constructed yet
    assert!(!screen.binding.is_initialized());

    // "view-ready": first access inflates
    assert_eq!(screen.binding.get().unwrap()[1], "submit");

    let mut submitted = 0;
    for step in [0u64, 120, 250, 380, 510] {
        clock.set(Timestamp::from_millis(step));
        if screen.submit_guard.check(&clock) {
            submitted += 1;
        }
    }
    assert_eq!(submitted, 2);
}
