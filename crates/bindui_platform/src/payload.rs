//! Structured key/value payloads passed between screens
//!
//! The host hands a screen a [`Payload`] of type-erased values. Screens read
//! typed values back through a [`PayloadAccessor`], whose retrieval strategy
//! is picked once from the platform's API level. A missing key and a value of
//! the wrong type are both ordinary outcomes and come back as `None`.

use std::any::{Any, TypeId};
use std::fmt;

use rustc_hash::FxHashMap;

use crate::version::ApiLevel;

/// A stored value together with the type it was stored as
struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// Read-only (to screens) key/value payload
#[derive(Default)]
pub struct Payload {
    entries: FxHashMap<String, Entry>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn put<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        self.entries.insert(
            key.into(),
            Entry {
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                value: Box::new(value),
            },
        );
        self
    }

    /// Builder-style [`put`](Self::put)
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.put(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Name of the type stored under `key`
    pub fn type_name(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(|entry| entry.type_name)
    }

    /// Type recorded for `key` when it was stored
    fn type_id(&self, key: &str) -> Option<TypeId> {
        self.entries.get(key).map(|entry| entry.type_id)
    }

    /// The raw value under `key`
    fn raw(&self, key: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.entries.get(key).map(|entry| entry.value.as_ref())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, entry)| (key, entry.type_name)))
            .finish()
    }
}

/// How typed values are pulled out of a payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetrievalStrategy {
    /// Check the recorded type before touching the value
    Typed,
    /// Fetch the untyped value, then cast it
    Untyped,
}

impl RetrievalStrategy {
    pub fn for_api_level(level: ApiLevel) -> Self {
        if level.supports(ApiLevel::TIRAMISU) {
            RetrievalStrategy::Typed
        } else {
            RetrievalStrategy::Untyped
        }
    }
}

/// Typed reads from a [`Payload`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadAccessor {
    strategy: RetrievalStrategy,
}

impl PayloadAccessor {
    pub fn new(strategy: RetrievalStrategy) -> Self {
        Self { strategy }
    }

    pub fn for_api_level(level: ApiLevel) -> Self {
        Self::new(RetrievalStrategy::for_api_level(level))
    }

    pub fn strategy(&self) -> RetrievalStrategy {
        self.strategy
    }

    /// Borrow the value under `key` as a `T`
    pub fn get_ref<'p, T: Any>(&self, payload: &'p Payload, key: &str) -> Option<&'p T> {
        let value = match self.strategy {
            RetrievalStrategy::Typed => {
                if payload.type_id(key)? != TypeId::of::<T>() {
                    None
                } else {
                    payload.raw(key)?.downcast_ref::<T>()
                }
            }
            RetrievalStrategy::Untyped => payload.raw(key)?.downcast_ref::<T>(),
        };

        if value.is_none() {
            tracing::debug!(
                key,
                expected = std::any::type_name::<T>(),
                stored = payload.type_name(key),
                "payload: type mismatch"
            );
        }
        value
    }

    /// Copy the value under `key` out as a `T`
    pub fn get<T: Any + Clone>(&self, payload: &Payload, key: &str) -> Option<T> {
        self.get_ref::<T>(payload, key).cloned()
    }
}
