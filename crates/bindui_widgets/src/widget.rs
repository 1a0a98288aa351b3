//! Widget handles

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::interactive::InteractiveState;

new_key_type! {
    pub struct WidgetId;
}

/// Click listener
///
/// Receives the view that was clicked, so a listener may re-toggle its own
/// view while it runs.
#[derive(Clone)]
pub struct ClickHandler(Rc<dyn Fn(&View)>);

impl ClickHandler {
    pub fn new<F: Fn(&View) + 'static>(handler: F) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, view: &View) {
        (self.0)(view)
    }

    /// Whether both handlers are the same listener
    pub fn ptr_eq(&self, other: &ClickHandler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler")
    }
}

/// A widget whose interactive state can be swapped
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Snapshot of the current interactive state
    fn interactive_state(&self) -> InteractiveState;

    /// Replace the whole interactive state, returning the previous one
    fn replace_interactive_state(&self, state: InteractiveState) -> InteractiveState;
}

struct ViewInner {
    id: WidgetId,
    name: String,
    state: RefCell<InteractiveState>,
}

/// Handle to a host widget
///
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct View {
    inner: Rc<ViewInner>,
}

impl View {
    pub(crate) fn new(id: WidgetId, name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                id,
                name: name.into(),
                state: RefCell::new(InteractiveState::default()),
            }),
        }
    }

    /// A view that belongs to no tree
    pub fn detached(name: impl Into<String>) -> Self {
        Self::new(WidgetId::default(), name)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.state.borrow().enabled
    }

    pub fn treatment(&self) -> bindui_core::Color {
        self.inner.state.borrow().treatment
    }

    pub fn has_click_listener(&self) -> bool {
        self.inner.state.borrow().listener.is_some()
    }

    /// Deliver a click, as the host does when the user taps the view
    ///
    /// Returns whether a listener ran. Disabled views and views without a
    /// listener swallow the click.
    pub fn perform_click(&self) -> bool {
        let listener = {
            let state = self.inner.state.borrow();
            if !state.enabled {
                return false;
            }
            state.listener.clone()
        };

        match listener {
            Some(listener) => {
                listener.call(self);
                true
            }
            None => false,
        }
    }

    /// Whether both handles refer to the same widget
    pub fn same(&self, other: &View) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Widget for View {
    fn id(&self) -> WidgetId {
        self.inner.id
    }

    fn interactive_state(&self) -> InteractiveState {
        self.inner.state.borrow().clone()
    }

    fn replace_interactive_state(&self, state: InteractiveState) -> InteractiveState {
        self.inner.state.replace(state)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("state", &self.inner.state.borrow())
            .finish()
    }
}
