// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Classes: named method tables with single inheritance.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard, RwLock};

use super::{Associations, Object, Value};
use crate::core::error::{ProxyError, Result};
use crate::core::message::Selector;

/// Property getter implementation.
pub type GetterImp = Arc<dyn Fn(&Object) -> Value + Send + Sync>;

/// Property setter implementation.
pub type SetterImp = Arc<dyn Fn(&Object, Value) -> Result<()> + Send + Sync>;

/// A method implementation, tagged with its calling convention.
#[derive(Clone)]
pub enum Implementation {
    Getter(GetterImp),
    Setter(SetterImp),
}

impl Implementation {
    pub fn kind(&self) -> &'static str {
        match self {
            Implementation::Getter(_) => "getter",
            Implementation::Setter(_) => "setter",
        }
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// A class in the object model.
///
/// Method lookup walks the superclass chain. Runtime subclasses are derived
/// from a base class so that rewriting their methods affects only the
/// instances moved onto them.
pub struct Class {
    name: String,
    superclass: Option<Arc<Class>>,
    runtime_generated: bool,
    methods: RwLock<HashMap<Selector, Implementation>>,
    associations: Associations,
    lock: ReentrantMutex<()>,
    /// Shared runtime subclass; lives while any instance is on it.
    runtime_subclass: Mutex<Weak<Class>>,
    method_replacements: AtomicUsize,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_superclass(name.into(), None, false)
    }

    fn with_superclass(name: String, superclass: Option<Arc<Class>>, runtime_generated: bool) -> Self {
        Self {
            name,
            superclass,
            runtime_generated,
            methods: RwLock::new(HashMap::new()),
            associations: Associations::new(),
            lock: ReentrantMutex::new(()),
            runtime_subclass: Mutex::new(Weak::new()),
            method_replacements: AtomicUsize::new(0),
        }
    }

    /// Add a getter to a class under construction.
    pub fn with_getter<F>(self, selector: impl Into<Selector>, getter: F) -> Self
    where
        F: Fn(&Object) -> Value + Send + Sync + 'static,
    {
        self.methods
            .write()
            .insert(selector.into(), Implementation::Getter(Arc::new(getter)));
        self
    }

    /// Add a setter to a class under construction.
    pub fn with_setter<F>(self, selector: impl Into<Selector>, setter: F) -> Self
    where
        F: Fn(&Object, Value) -> Result<()> + Send + Sync + 'static,
    {
        self.methods
            .write()
            .insert(selector.into(), Implementation::Setter(Arc::new(setter)));
        self
    }

    /// Add a getter/setter pair backed by the instance variable `ivar`.
    pub fn with_property(
        self,
        ivar: &'static str,
        getter: impl Into<Selector>,
        setter: impl Into<Selector>,
    ) -> Self {
        self.with_getter(getter, move |object| object.ivar(ivar))
            .with_setter(setter, move |object, value| {
                object.set_ivar(ivar, value);
                Ok(())
            })
    }

    /// A plain (non-runtime) subclass inheriting every method of `self`.
    pub fn subclass(self: &Arc<Self>, name: impl Into<String>) -> Self {
        Self::with_superclass(name.into(), Some(Arc::clone(self)), false)
    }

    pub(crate) fn runtime_subclass(self: &Arc<Self>, suffix: &str) -> Arc<Class> {
        let _guard = self.lock();
        let mut cached = self.runtime_subclass.lock();
        if let Some(existing) = cached.upgrade() {
            return existing;
        }

        let name = format!("{}{}", self.name, suffix);
        tracing::debug!("[runtime] Allocating runtime subclass {}", name);
        let subclass = Arc::new(Self::with_superclass(name, Some(Arc::clone(self)), true));
        *cached = Arc::downgrade(&subclass);
        subclass
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<&Arc<Class>> {
        self.superclass.as_ref()
    }

    /// Whether this class was derived at runtime to host rewritten methods.
    pub fn is_runtime_subclass(&self) -> bool {
        self.runtime_generated
    }

    /// Find the implementation of `selector`, searching superclasses.
    pub fn lookup(&self, selector: &Selector) -> Option<Implementation> {
        if let Some(imp) = self.methods.read().get(selector) {
            return Some(imp.clone());
        }
        self.superclass.as_ref()?.lookup(selector)
    }

    pub fn responds_to(&self, selector: &Selector) -> bool {
        self.lookup(selector).is_some()
    }

    pub fn lookup_getter(&self, selector: &Selector) -> Result<GetterImp> {
        match self.lookup(selector) {
            Some(Implementation::Getter(getter)) => Ok(getter),
            Some(_) => Err(self.signature_mismatch(selector, "getter")),
            None => Err(self.method_not_found(selector)),
        }
    }

    pub fn lookup_setter(&self, selector: &Selector) -> Result<SetterImp> {
        match self.lookup(selector) {
            Some(Implementation::Setter(setter)) => Ok(setter),
            Some(_) => Err(self.signature_mismatch(selector, "setter")),
            None => Err(self.method_not_found(selector)),
        }
    }

    /// Install `imp` for `selector` on this class only, returning the
    /// implementation this class itself previously defined.
    pub fn replace_method(&self, selector: Selector, imp: Implementation) -> Option<Implementation> {
        self.method_replacements.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("[runtime] {} replacing `{}` ({})", self.name, selector, imp.kind());
        self.methods.write().insert(selector, imp)
    }

    /// Number of `replace_method` calls made against this class.
    pub fn method_replacements(&self) -> usize {
        self.method_replacements.load(Ordering::SeqCst)
    }

    /// Class-level associated state.
    pub fn associations(&self) -> &Associations {
        &self.associations
    }

    /// Class-level lock. Re-entrant on the owning thread.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, ()> {
        self.lock.lock()
    }

    /// The class this one was derived from at runtime, or itself.
    pub fn original_class(self: &Arc<Self>) -> Arc<Class> {
        match (&self.superclass, self.runtime_generated) {
            (Some(superclass), true) => Arc::clone(superclass),
            _ => Arc::clone(self),
        }
    }

    fn method_not_found(&self, selector: &Selector) -> ProxyError {
        ProxyError::MethodNotFound {
            class: self.name.clone(),
            selector: selector.clone(),
        }
    }

    fn signature_mismatch(&self, selector: &Selector, expected: &'static str) -> ProxyError {
        ProxyError::SignatureMismatch {
            class: self.name.clone(),
            selector: selector.clone(),
            expected,
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field("runtime_generated", &self.runtime_generated)
            .finish()
    }
}
