//! Layout inflation errors

use thiserror::Error;

use crate::layout::LayoutId;

/// Errors from inflating layouts and binding their widgets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InflateError {
    /// No layout registered under this id
    #[error("Unknown layout {0}")]
    UnknownLayout(LayoutId),

    /// Two widgets in one tree share a name
    #[error("Duplicate widget {name:?} in layout {layout}")]
    DuplicateWidget { layout: LayoutId, name: String },

    /// A binding asked for a widget the layout does not contain
    #[error("Layout {layout} has no widget named {name:?}")]
    MissingWidget { layout: LayoutId, name: String },

    /// A root-bound binding was accessed before the screen's view existed
    #[error("Screen view is not ready")]
    ViewNotReady,
}

/// Result type for inflation
pub type Result<T> = std::result::Result<T, InflateError>;
