//! Debounced click handlers

use bindui_core::{Clock, SharedDebounceGuard};

use crate::widget::{ClickHandler, View};

/// Wrap `handler` so it only runs for clicks `guard` accepts
///
/// Clicks are timed with `clock`. Pass clones of one guard to several
/// handlers to debounce them as a group; give each handler its own guard to
/// keep them independent.
pub fn debounced<C>(handler: ClickHandler, guard: SharedDebounceGuard, clock: C) -> ClickHandler
where
    C: Clock + 'static,
{
    ClickHandler::new(move |view: &View| {
        if guard.check(&clock) {
            handler.call(view);
        } else {
            tracing::trace!(view = view.name(), "click suppressed by debounce guard");
        }
    })
}
