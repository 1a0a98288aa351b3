//! bindui Widgets
//!
//! Widget-facing helpers for screens driven by a host UI framework:
//!
//! - [`View`]: cheap handle to a host widget
//! - [`set_interactive`]: couple enabled state, visual treatment and click listener
//! - [`debounced`]: wrap a click handler behind a debounce guard
//! - [`LayoutInflater`]: the host's layout construction service
//! - [`ScreenBinding`]: a lazily inflated binding released when the screen is destroyed

pub mod debounced;
pub mod error;
pub mod interactive;
pub mod layout;
pub mod screen;
pub mod widget;

pub use debounced::debounced;
pub use error::{InflateError, Result};
pub use interactive::{set_interactive, set_interactive_res, ColorResId, ColorResources, InteractiveState};
pub use layout::{inflate_into, LayoutId, LayoutInflater, LayoutRegistry, ViewTree};
pub use screen::{bound_view_binding, view_binding, RootView, ScreenBinding, ScreenEvent};
pub use widget::{ClickHandler, View, Widget, WidgetId};
