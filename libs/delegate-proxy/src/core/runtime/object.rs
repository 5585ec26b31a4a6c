// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};

use super::{Associations, Class, Lifetime, Value};
use crate::core::delegates::dispatch;
use crate::core::error::{ProxyError, Result};
use crate::core::message::{Message, Selector};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// An instance in the object model.
///
/// Its dynamic class can be changed at runtime. Dropping the object ends
/// its [`Lifetime`] and releases everything in its associated storage.
pub struct Object {
    id: u64,
    class: RwLock<Arc<Class>>,
    ivars: RwLock<HashMap<&'static str, Value>>,
    associations: Associations,
    lock: ReentrantMutex<()>,
    lifetime: Lifetime,
}

impl Object {
    pub fn new(class: Arc<Class>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            class: RwLock::new(class),
            ivars: RwLock::new(HashMap::new()),
            associations: Associations::new(),
            lock: ReentrantMutex::new(()),
            lifetime: Lifetime::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current dynamic class.
    pub fn class(&self) -> Arc<Class> {
        Arc::clone(&self.class.read())
    }

    pub fn set_class(&self, class: Arc<Class>) {
        *self.class.write() = class;
    }

    pub fn ivar(&self, name: &str) -> Value {
        self.ivars.read().get(name).cloned().unwrap_or_default()
    }

    pub fn set_ivar(&self, name: &'static str, value: Value) {
        self.ivars.write().insert(name, value);
    }

    /// Invoke the getter `selector` through the dynamic class.
    pub fn get(&self, selector: &Selector) -> Result<Value> {
        let getter = self.class().lookup_getter(selector)?;
        Ok(getter(self))
    }

    /// Invoke the setter `selector` through the dynamic class.
    pub fn set(&self, selector: &Selector, value: impl Into<Value>) -> Result<()> {
        let setter = self.class().lookup_setter(selector)?;
        setter(self, value.into())
    }

    /// Deliver `message` to the delegate read through `getter`.
    ///
    /// Returns `Ok(None)` when no delegate is set or it does not respond.
    pub fn send_to_delegate(
        &self,
        getter: &Selector,
        message: &Message,
    ) -> Result<Option<serde_json::Value>> {
        match self.get(getter)? {
            Value::Nil => Ok(None),
            Value::Delegate(delegate) => dispatch(delegate.as_ref(), message),
            Value::Data(_) => Err(ProxyError::Configuration(format!(
                "`{}` on {} does not hold a delegate",
                getter,
                self.class().name()
            ))),
        }
    }

    pub fn associations(&self) -> &Associations {
        &self.associations
    }

    /// Instance-level lock. Re-entrant on the owning thread.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, ()> {
        self.lock.lock()
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        tracing::trace!("[runtime] Object #{} deallocating", self.id);
        self.lifetime.end();
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.id)
            .field("class", &self.class.read().name())
            .finish()
    }
}
