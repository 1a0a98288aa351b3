//! Screen-scoped view bindings
//!
//! A screen owns a [`ScreenBinding`] for its generated view binding. The
//! layout is inflated on the first access after the screen is created and
//! cached until the host reports [`ScreenEvent::Destroyed`], at which point the
//! binding and every widget handle it holds are dropped.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use bindui_core::{BindingError, LazyBinding};

use crate::error::{InflateError, Result};
use crate::layout::{LayoutId, LayoutInflater, ViewTree};

/// Screen lifecycle events delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    Created,
    /// The screen's root view now exists
    ViewReady,
    Destroyed,
}

/// A lazy binding that lives as long as its screen
pub struct ScreenBinding<T> {
    binding: Option<LazyBinding<T>>,
}

impl<T> ScreenBinding<T> {
    pub fn new(binding: LazyBinding<T>) -> Self {
        Self {
            binding: Some(binding),
        }
    }

    /// Get the binding, constructing it on first access
    ///
    /// Fails with [`BindingError::Released`] once the screen is destroyed.
    pub fn get(&self) -> bindui_core::Result<&T> {
        self.binding
            .as_ref()
            .ok_or(BindingError::Released)?
            .get()
    }

    pub fn on_event(&mut self, event: ScreenEvent) {
        tracing::debug!(?event, binding = std::any::type_name::<T>(), "screen event");
        if event == ScreenEvent::Destroyed {
            self.binding = None;
        }
    }

    pub fn is_released(&self) -> bool {
        self.binding.is_none()
    }

    pub fn is_initialized(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(LazyBinding::is_initialized)
    }
}

impl<T> From<LazyBinding<T>> for ScreenBinding<T> {
    fn from(binding: LazyBinding<T>) -> Self {
        Self::new(binding)
    }
}

/// Binding that inflates `layout` on first access and hands the tree to `bind`
///
/// `bind` picks the widgets the generated binding exposes, typically with
/// [`ViewTree::require`].
pub fn view_binding<T, I, B>(inflater: Rc<I>, layout: LayoutId, bind: B) -> LazyBinding<T>
where
    I: LayoutInflater + ?Sized + 'static,
    B: Fn(&ViewTree) -> Result<T> + 'static,
{
    LazyBinding::fallible(move || {
        let tree = inflater.inflate(layout)?;
        bind(&tree)
    })
}

/// The root view a host attaches to a screen once it exists
#[derive(Clone, Debug, Default)]
pub struct RootView(Rc<RefCell<Option<ViewTree>>>);

impl RootView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, tree: ViewTree) {
        self.0.replace(Some(tree));
    }

    pub fn clear(&self) {
        self.0.replace(None);
    }

    pub fn is_ready(&self) -> bool {
        self.0.borrow().is_some()
    }

    pub fn get(&self) -> Option<Ref<'_, ViewTree>> {
        Ref::filter_map(self.0.borrow(), Option::as_ref).ok()
    }
}

/// Binding over a view the host creates itself, such as a fragment's root
///
/// Accessing it before the root is set fails with
/// [`InflateError::ViewNotReady`]; the binding is not cached and the next
/// access tries again.
pub fn bound_view_binding<T, B>(root: &RootView, bind: B) -> LazyBinding<T>
where
    B: Fn(&ViewTree) -> Result<T> + 'static,
{
    let root = root.clone();
    LazyBinding::fallible(move || {
        let tree = root.get().ok_or(InflateError::ViewNotReady)?;
        bind(&tree)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRegistry;
    use crate::widget::View;
    use std::cell::Cell;

    const LOGIN: LayoutId = LayoutId(10);

    struct LoginBinding {
        root: View,
        submit: View,
    }

    fn bind_login(tree: &ViewTree) -> Result<LoginBinding> {
        Ok(LoginBinding {
            root: tree.require("root")?,
            submit: tree.require("submit")?,
        })
    }

    /// Inflater that counts its calls
    struct Counting {
        registry: LayoutRegistry,
        calls: Cell<u32>,
    }

    impl LayoutInflater for Counting {
        fn inflate(&self, layout: LayoutId) -> Result<ViewTree> {
            self.calls.set(self.calls.get() + 1);
            self.registry.inflate(layout)
        }
    }

    fn counting() -> Rc<Counting> {
        let mut registry = LayoutRegistry::new();
        registry.register(LOGIN, ["root", "submit"]);
        Rc::new(Counting {
            registry,
            calls: Cell::new(0),
        })
    }

    #[test]
    fn test_inflates_once() {
        let inflater = counting();
        let binding = ScreenBinding::new(view_binding(inflater.clone(), LOGIN, bind_login));

        assert!(!binding.is_initialized());
        let first = binding.get().unwrap();
        let second = binding.get().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.root.same(&second.root));
        assert_eq!(inflater.calls.get(), 1);
    }

    #[test]
    fn test_destroyed_releases_binding() {
        let inflater = counting();
        let mut binding = ScreenBinding::new(view_binding(inflater, LOGIN, bind_login));
        binding.on_event(ScreenEvent::Created);
        let submit = binding.get().unwrap().submit.clone();

        binding.on_event(ScreenEvent::Destroyed);
        assert!(binding.is_released());
        assert!(matches!(binding.get(), Err(BindingError::Released)));
        // Handles taken earlier stay valid on their own
        assert_eq!(submit.name(), "submit");
    }

    #[test]
    fn test_missing_widget_fails_and_retries() {
        let inflater = counting();
        let binding = view_binding(inflater.clone(), LOGIN, |tree: &ViewTree| tree.require("absent"));

        assert!(matches!(binding.get(), Err(BindingError::Construction(_))));
        assert!(binding.get().is_err());
        assert!(!binding.is_initialized());
        assert_eq!(inflater.calls.get(), 2);
    }

    #[test]
    fn test_bound_binding_waits_for_root() {
        let mut registry = LayoutRegistry::new();
        registry.register(LOGIN, ["root", "submit"]);
        let root = RootView::new();
        let binding = ScreenBinding::new(bound_view_binding(&root, bind_login));

        let err = binding.get().err().unwrap();
        assert!(err.to_string().contains("not ready"));
        assert!(!binding.is_initialized());

        root.set(registry.inflate(LOGIN).unwrap());
        let bound = binding.get().unwrap();
        let tree = root.get().unwrap();
        assert!(bound.submit.same(tree.find("submit").unwrap()));
    }
}
