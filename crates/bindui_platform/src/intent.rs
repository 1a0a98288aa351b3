//! Navigation intents and their extras

use crate::payload::{Payload, PayloadAccessor};

/// A request to open a screen, optionally carrying a payload of extras
#[derive(Debug, Default)]
pub struct Intent {
    action: String,
    extras: Option<Payload>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            extras: None,
        }
    }

    /// Attach a full payload of extras
    pub fn with_extras(mut self, extras: Payload) -> Self {
        self.extras = Some(extras);
        self
    }

    /// Add one extra, creating the extras payload if needed
    pub fn put_extra<T>(&mut self, key: impl Into<String>, value: T) -> &mut Self
    where
        T: std::any::Any + Send + Sync,
    {
        self.extras.get_or_insert_with(Payload::new).put(key, value);
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn extras(&self) -> Option<&Payload> {
        self.extras.as_ref()
    }

    /// Typed extra under `key`
    pub fn get_extra<T>(&self, accessor: &PayloadAccessor, key: &str) -> Option<T>
    where
        T: std::any::Any + Clone,
    {
        accessor.get(self.extras.as_ref()?, key)
    }
}

/// Typed extra from an intent that may not exist
///
/// `None` when there is no intent, it carries no extras, the key is missing,
/// or the value has another type.
pub fn get_intent_extra<T>(intent: Option<&Intent>, accessor: &PayloadAccessor, key: &str) -> Option<T>
where
    T: std::any::Any + Clone,
{
    intent?.get_extra(accessor, key)
}
