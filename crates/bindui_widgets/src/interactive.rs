//! Interactive-state toggle
//!
//! A widget is either active (enabled, active treatment, listener attached)
//! or inactive (disabled, inactive treatment, no listener). The toggle swaps
//! all three as a single [`InteractiveState`], so no reader, including a
//! listener re-toggling its own widget mid-click, sees a mix of old and new.

use rustc_hash::FxHashMap;

use bindui_core::Color;

use crate::widget::{ClickHandler, Widget};

/// Enabled flag, visual treatment and click listener of one widget
#[derive(Clone, Debug)]
pub struct InteractiveState {
    pub enabled: bool,
    /// Background tint
    pub treatment: Color,
    pub listener: Option<ClickHandler>,
}

impl Default for InteractiveState {
    fn default() -> Self {
        Self {
            enabled: true,
            treatment: Color::TRANSPARENT,
            listener: None,
        }
    }
}

impl InteractiveState {
    pub fn active(handler: ClickHandler, treatment: Color) -> Self {
        Self {
            enabled: true,
            treatment,
            listener: Some(handler),
        }
    }

    pub fn inactive(treatment: Color) -> Self {
        Self {
            enabled: false,
            treatment,
            listener: None,
        }
    }
}

/// Make `widget` active or inactive
///
/// Active: enabled, `active_treatment`, `handler` replaces any previous
/// listener. Inactive: disabled, `inactive_treatment`, listener removed.
pub fn set_interactive<W: Widget + ?Sized>(
    widget: &W,
    active: bool,
    handler: ClickHandler,
    active_treatment: Color,
    inactive_treatment: Color,
) {
    let state = if active {
        InteractiveState::active(handler, active_treatment)
    } else {
        InteractiveState::inactive(inactive_treatment)
    };
    widget.replace_interactive_state(state);
}

/// Host color resource id
pub type ColorResId = u32;

/// Resolves color resource ids, as the host's theme/context does
pub trait ColorResources {
    fn color(&self, id: ColorResId) -> Option<Color>;
}

impl ColorResources for FxHashMap<ColorResId, Color> {
    fn color(&self, id: ColorResId) -> Option<Color> {
        self.get(&id).copied()
    }
}

impl<F: Fn(ColorResId) -> Option<Color>> ColorResources for F {
    fn color(&self, id: ColorResId) -> Option<Color> {
        self(id)
    }
}

/// [`set_interactive`] with treatments given as color resources
///
/// If the resource for the requested state cannot be resolved the widget
/// keeps its current treatment; the enabled flag and listener still change.
pub fn set_interactive_res<W, R>(
    widget: &W,
    active: bool,
    handler: ClickHandler,
    resources: &R,
    active_color: ColorResId,
    inactive_color: ColorResId,
) where
    W: Widget + ?Sized,
    R: ColorResources + ?Sized,
{
    let wanted = if active { active_color } else { inactive_color };
    let treatment = resources.color(wanted).unwrap_or_else(|| {
        tracing::warn!(resource = wanted, "unknown color resource; keeping current treatment");
        widget.interactive_state().treatment
    });
    set_interactive(widget, active, handler, treatment, treatment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::View;
    use std::cell::Cell;
    use std::rc::Rc;

    const ACTIVE: Color = Color::rgb(0.2, 0.5, 0.9);
    const INACTIVE: Color = Color::rgba(0.5, 0.5, 0.5, 0.5);

    fn counting_handler() -> (ClickHandler, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let handler = ClickHandler::new(move |_| counter.set(counter.get() + 1));
        (handler, clicks)
    }

    #[test]
    fn test_inactive_blocks_handler() {
        let view = View::detached("submit");
        let (handler, clicks) = counting_handler();

        set_interactive(&view, false, handler, ACTIVE, INACTIVE);

        assert!(!view.is_enabled());
        assert_eq!(view.treatment(), INACTIVE);
        assert!(!view.has_click_listener());
        assert!(!view.perform_click());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_active_runs_handler_once_per_click() {
        let view = View::detached("submit");
        let (handler, clicks) = counting_handler();

        set_interactive(&view, true, handler, ACTIVE, INACTIVE);

        assert!(view.is_enabled());
        assert_eq!(view.treatment(), ACTIVE);
        assert!(view.perform_click());
        assert_eq!(clicks.get(), 1);
        assert!(view.perform_click());
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_active_replaces_previous_listener() {
        let view = View::detached("submit");
        let (first, first_clicks) = counting_handler();
        let (second, second_clicks) = counting_handler();

        set_interactive(&view, true, first, ACTIVE, INACTIVE);
        set_interactive(&view, true, second.clone(), ACTIVE, INACTIVE);
        view.perform_click();

        assert_eq!(first_clicks.get(), 0);
        assert_eq!(second_clicks.get(), 1);
        let listener = view.interactive_state().listener;
        assert!(listener.is_some_and(|l| l.ptr_eq(&second)));
    }

    #[test]
    fn test_handler_can_deactivate_its_own_view() {
        let view = View::detached("submit");
        let seen_inside = Rc::new(Cell::new(None));
        let seen = seen_inside.clone();

        let handler = ClickHandler::new(move |view: &View| {
            set_interactive(view, false, ClickHandler::new(|_| {}), ACTIVE, INACTIVE);
            seen.set(Some((view.is_enabled(), view.has_click_listener(), view.treatment())));
        });
        set_interactive(&view, true, handler, ACTIVE, INACTIVE);

        assert!(view.perform_click());
        assert_eq!(seen_inside.get(), Some((false, false, INACTIVE)));
        assert!(!view.perform_click());
    }

    #[test]
    fn test_resource_treatments() {
        let mut palette: FxHashMap<ColorResId, Color> = FxHashMap::default();
        palette.insert(1, ACTIVE);
        palette.insert(2, INACTIVE);

        let view = View::detached("submit");
        let (handler, _) = counting_handler();

        set_interactive_res(&view, true, handler.clone(), &palette, 1, 2);
        assert_eq!(view.treatment(), ACTIVE);

        set_interactive_res(&view, false, handler.clone(), &palette, 1, 2);
        assert_eq!(view.treatment(), INACTIVE);
        assert!(!view.is_enabled());

        // Unknown resource keeps the last treatment but still toggles
        set_interactive_res(&view, true, handler, &palette, 99, 2);
        assert_eq!(view.treatment(), INACTIVE);
        assert!(view.is_enabled());
        assert!(view.has_click_listener());
    }

    #[test]
    fn test_closure_resources() {
        let resolve = |id: ColorResId| (id == 7).then_some(Color::GREEN);
        let view = View::detached("toggle");
        set_interactive_res(&view, false, ClickHandler::new(|_| {}), &resolve, 3, 7);
        assert_eq!(view.treatment(), Color::GREEN);
    }
}
