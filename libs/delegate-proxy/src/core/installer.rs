// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Proxy installation and lifecycle.

use std::sync::Arc;

use crate::core::config::ProxyConfig;
use crate::core::delegates::{DelegateProxy, DelegateRef};
use crate::core::error::Result;
use crate::core::message::Selector;
use crate::core::reactive::Reactive;
use crate::core::runtime::{AssociationKey, Object, SetterImp, Value};
use crate::core::swizzle;

/// Key identifying one delegate slot's proxy in an object's associated storage.
pub type SlotKey = AssociationKey;

/// Describes a delegate property of a host class: its getter, its setter,
/// and the key its proxy is stored under.
///
/// # Example
/// ```ignore
/// let slot = DelegateSlot::new("delegate", "setDelegate:");
/// let proxy = slot.proxy(&scroll_view)?;
/// ```
#[derive(Debug, Clone)]
pub struct DelegateSlot {
    getter: Selector,
    setter: Selector,
    key: Option<SlotKey>,
    config: ProxyConfig,
}

impl DelegateSlot {
    pub fn new(getter: impl Into<Selector>, setter: impl Into<Selector>) -> Self {
        Self {
            getter: getter.into(),
            setter: setter.into(),
            key: None,
            config: ProxyConfig::default(),
        }
    }

    /// Store the proxy under `key` instead of the key derived from the setter.
    pub fn with_key(mut self, key: impl Into<SlotKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn getter(&self) -> &Selector {
        &self.getter
    }

    pub fn setter(&self) -> &Selector {
        &self.setter
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn key(&self) -> SlotKey {
        match &self.key {
            Some(key) => key.clone(),
            None => SlotKey::new(format!("{}:{}", self.config.key_prefix, self.setter)),
        }
    }

    /// The proxy already installed on `object` for this slot, if any.
    pub fn installed_proxy(&self, object: &Object) -> Option<Arc<DelegateProxy>> {
        object.associations().get::<DelegateProxy>(&self.key())
    }

    /// Reactive façade for this slot on `object`.
    pub fn reactive<'a>(&'a self, object: &'a Arc<Object>) -> Reactive<'a> {
        Reactive::new(object, self)
    }

    /// Get or install the proxy for this slot on `object`.
    ///
    /// Returns the same proxy for the lifetime of `object`. Fails when the
    /// slot is mis-described (missing or mis-typed getter/setter, a current
    /// slot value that is not a delegate, another key already owning the
    /// setter) or when the host's setter fails. Nothing stays installed
    /// after a failure.
    pub fn proxy(&self, object: &Arc<Object>) -> Result<Arc<DelegateProxy>> {
        let _guard = object.lock();
        let key = self.key();
        if let Some(proxy) = object.associations().get::<DelegateProxy>(&key) {
            return Ok(proxy);
        }

        self.install(object, key).inspect_err(|e| {
            tracing::error!(
                "[installer] Failed to install proxy for `{}` on {:?}: {}",
                self.setter,
                object,
                e
            );
        })
    }

    fn install(&self, object: &Arc<Object>, key: SlotKey) -> Result<Arc<DelegateProxy>> {
        // Original accessors come from the real class, before any redirection.
        let real_class = object.class().original_class();
        let original_setter = real_class.lookup_setter(&self.setter)?;
        let original_getter = real_class.lookup_getter(&self.getter)?;

        let subclass = swizzle::runtime_subclass(object, &self.config);
        swizzle::ensure_swizzled(&subclass, self)?;

        let host = Arc::downgrade(object);
        let reinstall_setter = Arc::clone(&original_setter);
        let proxy = DelegateProxy::new(
            object.lifetime().clone(),
            self.config.reinstall,
            Box::new(move |proxy: &Arc<DelegateProxy>| match host.upgrade() {
                Some(host) => {
                    let visible: DelegateRef = proxy.clone();
                    reinstall_setter(host.as_ref(), Value::Delegate(visible))
                }
                None => Ok(()),
            }),
        );

        let previous = original_getter(object.as_ref());

        // Stored before anything observable so re-entrant lookups find it.
        object.associations().set(key.clone(), Arc::clone(&proxy));

        let applied = Self::adopt_and_apply(object, &proxy, previous.clone(), &original_setter);
        if let Err(e) = applied {
            // Never leave a stored proxy that is not the visible delegate,
            // nor a visible proxy that is not stored.
            object.associations().remove(&key);
            if let Err(restore) = original_setter(object.as_ref(), previous) {
                tracing::warn!(
                    "[installer] Failed to restore `{}` on {:?}: {}",
                    self.setter,
                    object,
                    restore
                );
            }
            return Err(e);
        }

        tracing::debug!(
            "[installer] Installed proxy `{}` on {:?} (forwardee: {})",
            key,
            object,
            proxy.forwardee().is_some()
        );
        Ok(proxy)
    }

    /// Adopt `current`, the slot's value before installation, as forwardee,
    /// then make the proxy the visible delegate.
    fn adopt_and_apply(
        object: &Arc<Object>,
        proxy: &Arc<DelegateProxy>,
        current: Value,
        original_setter: &SetterImp,
    ) -> Result<()> {
        proxy.set_forwardee(current.into_delegate()?)?;

        let visible: DelegateRef = proxy.clone();
        original_setter(object.as_ref(), Value::Delegate(visible))
    }
}
