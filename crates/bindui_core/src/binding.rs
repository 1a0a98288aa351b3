//! Memoized lazy bindings
//!
//! A screen declares its binding up front and pays for constructing it (usually
//! a layout inflation) on first access. The constructor runs at most once per
//! [`LazyBinding`]; every later access returns the same cached value.
//!
//! # Threading
//!
//! [`LazyBinding`] performs no locking and is `!Sync`: it belongs to the screen
//! that owns it and is only touched from the host's UI thread, which the
//! compiler enforces. Code that really needs to share a binding across threads
//! uses [`SyncLazyBinding`], which serializes construction behind a mutex.
//!
//! # Failure
//!
//! If the constructor fails the cell stays uninitialized, the error is handed
//! to the caller of `get()`, and the next `get()` tries again.
//!
//! ```rust
//! use bindui_core::binding::LazyBinding;
//!
//! let binding = LazyBinding::new(|| String::from("inflated"));
//! assert!(!binding.is_initialized());
//! let first = binding.get().unwrap();
//! let second = binding.get().unwrap();
//! assert!(std::ptr::eq(first, second));
//! ```

use std::cell::{OnceCell, RefCell};
use std::convert::Infallible;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::{BindingError, BoxError, Result};

type Constructor<T> = Box<dyn FnMut() -> std::result::Result<T, BoxError>>;
type SyncConstructor<T> = Box<dyn FnMut() -> std::result::Result<T, BoxError> + Send>;

/// Wrap `constructor` in a [`LazyBinding`]
pub fn acquire<T, F>(constructor: F) -> LazyBinding<T>
where
    F: FnMut() -> T + 'static,
{
    LazyBinding::new(constructor)
}

/// Single-threaded memoized binding
pub struct LazyBinding<T> {
    /// `Uninitialized` until the first successful construction, then
    /// `Initialized(T)` for good
    cell: OnceCell<T>,
    /// Borrowed mutably only while constructing; dropped once the binding
    /// exists
    constructor: RefCell<Option<Constructor<T>>>,
}

impl<T> LazyBinding<T> {
    /// Create a binding from an infallible constructor
    pub fn new<F>(mut constructor: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::fallible(move || Ok::<T, Infallible>(constructor()))
    }

    /// Create a binding from a constructor that may fail
    pub fn fallible<F, E>(mut constructor: F) -> Self
    where
        F: FnMut() -> std::result::Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        Self {
            cell: OnceCell::new(),
            constructor: RefCell::new(Some(Box::new(move || {
                constructor().map_err(Into::into)
            }))),
        }
    }

    /// Get the binding, constructing it on first access
    pub fn get(&self) -> Result<&T> {
        if let Some(binding) = self.cell.get() {
            return Ok(binding);
        }

        let mut slot = self
            .constructor
            .try_borrow_mut()
            .map_err(|_| BindingError::Reentrant)?;
        let Some(constructor) = slot.as_mut() else {
            // Only taken after the cell is filled
            return self.cell.get().ok_or(BindingError::Reentrant);
        };

        match (*constructor)() {
            Ok(binding) => {
                let constructor = slot.take();
                drop(slot);
                tracing::debug!(binding = std::any::type_name::<T>(), "binding constructed");
                // The constructor borrow kept every other initializer out, so
                // the cell is still empty here
                let binding = self.cell.get_or_init(|| binding);
                // Captured state may run code on drop; the cell is already set
                drop(constructor);
                Ok(binding)
            }
            Err(err) => {
                tracing::warn!(
                    binding = std::any::type_name::<T>(),
                    error = %err,
                    "binding construction failed; will retry on next access"
                );
                Err(BindingError::Construction(err))
            }
        }
    }

    /// Whether the constructor has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The cached binding, without constructing it
    pub fn get_if_initialized(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Consume the cell, returning the binding if it was ever constructed
    pub fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyBinding")
            .field("binding", &self.cell.get())
            .finish_non_exhaustive()
    }
}

/// Thread-safe memoized binding
///
/// Construction happens under a mutex with a second check of the cell, so
/// concurrent first accesses still run the constructor once. The constructor
/// must not call `get()` on the binding it is building.
pub struct SyncLazyBinding<T> {
    cell: OnceLock<T>,
    constructor: Mutex<Option<SyncConstructor<T>>>,
}

impl<T> SyncLazyBinding<T> {
    pub fn new<F>(mut constructor: F) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        Self::fallible(move || Ok::<T, Infallible>(constructor()))
    }

    pub fn fallible<F, E>(mut constructor: F) -> Self
    where
        F: FnMut() -> std::result::Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        Self {
            cell: OnceLock::new(),
            constructor: Mutex::new(Some(Box::new(move || {
                constructor().map_err(Into::into)
            }))),
        }
    }

    /// Get the binding, constructing it on first access
    pub fn get(&self) -> Result<&T> {
        if let Some(binding) = self.cell.get() {
            return Ok(binding);
        }

        // A panicking constructor leaves the cell empty; the next caller retries
        let mut slot = self
            .constructor
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another thread may have finished while we waited for the lock
        if let Some(binding) = self.cell.get() {
            return Ok(binding);
        }
        let Some(constructor) = slot.as_mut() else {
            return self.cell.get().ok_or(BindingError::Reentrant);
        };

        match (*constructor)() {
            Ok(binding) => {
                tracing::debug!(binding = std::any::type_name::<T>(), "binding constructed");
                let binding = self.cell.get_or_init(|| binding);
                slot.take();
                Ok(binding)
            }
            Err(err) => {
                tracing::warn!(
                    binding = std::any::type_name::<T>(),
                    error = %err,
                    "binding construction failed; will retry on next access"
                );
                Err(BindingError::Construction(err))
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get_if_initialized(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncLazyBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncLazyBinding")
            .field("binding", &self.cell.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_constructor_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let binding = acquire(move || {
            counter.set(counter.get() + 1);
            vec![1, 2, 3]
        });

        assert_eq!(calls.get(), 0);
        let first = binding.get().unwrap();
        for _ in 0..10 {
            assert!(std::ptr::eq(first, binding.get().unwrap()));
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failure_leaves_cell_uninitialized_and_retries() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();
        let binding = LazyBinding::fallible(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Err("layout service unavailable")
            } else {
                Ok(7u32)
            }
        });

        let err = binding.get().unwrap_err();
        assert!(matches!(err, BindingError::Construction(_)));
        assert!(err.to_string().contains("layout service unavailable"));
        assert!(!binding.is_initialized());

        assert_eq!(*binding.get().unwrap(), 7);
        assert_eq!(*binding.get().unwrap(), 7);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn test_reentrant_access_is_an_error() {
        let slot: Rc<RefCell<Option<Rc<LazyBinding<u8>>>>> = Rc::new(RefCell::new(None));
        let inner_slot = slot.clone();
        let observed = Rc::new(Cell::new(false));
        let observed_inner = observed.clone();

        let binding = Rc::new(LazyBinding::new(move || {
            if let Some(me) = inner_slot.borrow().as_ref() {
                observed_inner.set(matches!(me.get(), Err(BindingError::Reentrant)));
            }
            1
        }));
        *slot.borrow_mut() = Some(binding.clone());

        assert_eq!(*binding.get().unwrap(), 1);
        assert!(observed.get());
        slot.borrow_mut().take();
    }

    #[test]
    fn test_get_if_initialized_does_not_construct() {
        let binding = LazyBinding::new(|| 5);
        assert_eq!(binding.get_if_initialized(), None);
        binding.get().unwrap();
        assert_eq!(binding.get_if_initialized(), Some(&5));
        assert_eq!(binding.into_inner(), Some(5));
    }

    #[test]
    fn test_constructor_released_after_success() {
        let service = Rc::new(String::from("inflater"));
        let captured = service.clone();
        let binding = LazyBinding::new(move || captured.len());

        assert_eq!(Rc::strong_count(&service), 2);
        assert_eq!(*binding.get().unwrap(), 8);
        assert_eq!(Rc::strong_count(&service), 1);
        assert_eq!(*binding.get().unwrap(), 8);
    }

    #[test]
    fn test_constructor_kept_after_failure() {
        let service = Rc::new(Cell::new(false));
        let captured = service.clone();
        let binding = LazyBinding::fallible(move || {
            if captured.get() {
                Ok(1u8)
            } else {
                Err("not yet")
            }
        });

        assert!(binding.get().is_err());
        assert_eq!(Rc::strong_count(&service), 2);
        service.set(true);
        assert_eq!(*binding.get().unwrap(), 1);
        assert_eq!(Rc::strong_count(&service), 1);
    }

    #[test]
    fn test_sync_binding_retries_after_failure() {
        let mut fail = true;
        let binding = SyncLazyBinding::fallible(move || {
            if std::mem::take(&mut fail) {
                Err("boom")
            } else {
                Ok("ready")
            }
        });
        assert!(binding.get().is_err());
        assert_eq!(*binding.get().unwrap(), "ready");
    }
}
