//! Layouts and the inflation service
//!
//! The host turns a [`LayoutId`] into a [`ViewTree`] through its
//! [`LayoutInflater`]. Generated bindings then look their widgets up by name.
//! [`LayoutRegistry`] is an in-memory inflater for hosts that describe
//! layouts as plain widget lists, and for tests.

use std::fmt;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{InflateError, Result};
use crate::widget::{View, WidgetId};

/// Host layout resource id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutId(pub u32);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The widgets of one inflated layout
#[derive(Clone, Debug)]
pub struct ViewTree {
    layout: LayoutId,
    views: SlotMap<WidgetId, View>,
    names: FxHashMap<String, WidgetId>,
    /// Insertion order; the first widget is the root
    order: Vec<WidgetId>,
}

impl ViewTree {
    pub fn new(layout: LayoutId) -> Self {
        Self {
            layout,
            views: SlotMap::with_key(),
            names: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    /// Add a widget. The first widget added becomes the root.
    pub fn insert(&mut self, name: &str) -> Result<WidgetId> {
        if self.names.contains_key(name) {
            return Err(InflateError::DuplicateWidget {
                layout: self.layout,
                name: name.to_string(),
            });
        }
        let id = self.views.insert_with_key(|id| View::new(id, name));
        self.names.insert(name.to_string(), id);
        self.order.push(id);
        Ok(id)
    }

    pub fn view(&self, id: WidgetId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn find(&self, name: &str) -> Option<&View> {
        self.names.get(name).and_then(|id| self.views.get(*id))
    }

    /// Handle to the widget called `name`, for binding constructors
    pub fn require(&self, name: &str) -> Result<View> {
        self.find(name)
            .cloned()
            .ok_or_else(|| InflateError::MissingWidget {
                layout: self.layout,
                name: name.to_string(),
            })
    }

    pub fn root(&self) -> Option<&View> {
        self.order.first().and_then(|id| self.views.get(*id))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Views in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.order.iter().filter_map(|id| self.views.get(*id))
    }

    /// Move every widget of `child` into this tree, returning their new ids
    fn attach(&mut self, child: ViewTree) -> Result<Vec<WidgetId>> {
        let clash = child
            .iter()
            .map(View::name)
            .find(|name| self.names.contains_key(*name));
        if let Some(name) = clash {
            return Err(InflateError::DuplicateWidget {
                layout: self.layout,
                name: name.to_string(),
            });
        }
        child.iter().map(|view| self.insert(view.name())).collect()
    }
}

/// The host's layout construction service
pub trait LayoutInflater {
    /// Build the widgets of `layout`
    fn inflate(&self, layout: LayoutId) -> Result<ViewTree>;
}

/// Inflate `layout` and add its widgets to `parent` without making them its root
pub fn inflate_into<I>(inflater: &I, parent: &mut ViewTree, layout: LayoutId) -> Result<Vec<WidgetId>>
where
    I: LayoutInflater + ?Sized,
{
    let child = inflater.inflate(layout)?;
    let ids = parent.attach(child)?;
    tracing::debug!(
        layout = %layout,
        parent = %parent.layout(),
        widgets = ids.len(),
        "inflated into parent"
    );
    Ok(ids)
}

/// In-memory layouts described as widget-name lists
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    layouts: FxHashMap<LayoutId, Vec<String>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `layout` with its widgets; the first is the root
    pub fn register<S: Into<String>>(
        &mut self,
        layout: LayoutId,
        widgets: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.layouts
            .insert(layout, widgets.into_iter().map(Into::into).collect());
        self
    }

    pub fn contains(&self, layout: LayoutId) -> bool {
        self.layouts.contains_key(&layout)
    }
}

impl LayoutInflater for LayoutRegistry {
    fn inflate(&self, layout: LayoutId) -> Result<ViewTree> {
        let widgets = self
            .layouts
            .get(&layout)
            .ok_or(InflateError::UnknownLayout(layout))?;

        let mut tree = ViewTree::new(layout);
        for name in widgets {
            tree.insert(name)?;
        }
        tracing::debug!(layout = %layout, widgets = tree.len(), "inflated layout");
        Ok(tree)
    }
}
