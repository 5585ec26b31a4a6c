// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Per-object associated storage.

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Key under which a value is attached to an object or class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssociationKey(Cow<'static, str>);

impl AssociationKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for AssociationKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for AssociationKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

type Associated = Arc<dyn Any + Send + Sync>;

/// Hidden key/value state attached to a single object.
///
/// Values live exactly as long as the owner, unless removed.
#[derive(Default)]
pub struct Associations {
    values: Mutex<HashMap<AssociationKey, Associated>>,
}

impl Associations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, if present and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &AssociationKey) -> Option<Arc<T>> {
        let value = self.values.lock().get(key).cloned()?;
        value.downcast::<T>().ok()
    }

    pub fn set<T: Any + Send + Sync>(&self, key: AssociationKey, value: Arc<T>) {
        self.values.lock().insert(key, value);
    }

    pub fn contains(&self, key: &AssociationKey) -> bool {
        self.values.lock().contains_key(key)
    }

    pub fn remove(&self, key: &AssociationKey) -> bool {
        self.values.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_typed() {
        let associations = Associations::new();
        associations.set(AssociationKey::from("count"), Arc::new(3_u32));

        assert_eq!(associations.get::<u32>(&"count".into()).as_deref(), Some(&3));
        assert!(associations.get::<String>(&"count".into()).is_none());
    }

    #[test]
    fn test_remove() {
        let associations = Associations::new();
        associations.set("flag".into(), Arc::new(true));

        assert!(associations.remove(&"flag".into()));
        assert!(!associations.remove(&"flag".into()));
        assert!(associations.is_empty());
    }
}
