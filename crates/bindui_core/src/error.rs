//! Core error types

use thiserror::Error;

/// Boxed error produced by a binding constructor
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while acquiring a binding
#[derive(Error, Debug)]
pub enum BindingError {
    /// The constructor failed; the cell stays uninitialized and the next
    /// access retries
    #[error("Binding construction failed: {0}")]
    Construction(#[source] BoxError),

    /// `get()` was called from inside the binding's own constructor
    #[error("Binding accessed while it was being constructed")]
    Reentrant,

    /// The owning screen was destroyed and the binding released
    #[error("Binding released: owning screen was destroyed")]
    Released,
}

impl BindingError {
    /// Wrap any constructor error
    pub fn construction(err: impl Into<BoxError>) -> Self {
        BindingError::Construction(err.into())
    }
}

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindingError>;
