// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! One-time setter redirection on runtime subclasses.

use std::sync::Arc;

use crate::core::config::ProxyConfig;
use crate::core::delegates::DelegateProxy;
use crate::core::error::{ProxyError, Result};
use crate::core::installer::DelegateSlot;
use crate::core::message::Selector;
use crate::core::runtime::{AssociationKey, Class, Implementation, Object, SetterImp, Value};

/// Move `object` onto the runtime subclass of its class and return it.
///
/// Objects already on a runtime subclass stay where they are. Sibling
/// objects still on the base class are unaffected.
pub fn runtime_subclass(object: &Object, config: &ProxyConfig) -> Arc<Class> {
    let class = object.class();
    if class.is_runtime_subclass() {
        return class;
    }

    let subclass = class.runtime_subclass(&config.subclass_suffix);
    tracing::debug!(
        "[swizzle] Object #{} moved from {} to {}",
        object.id(),
        class.name(),
        subclass.name()
    );
    object.set_class(Arc::clone(&subclass));
    subclass
}

/// Redirect `slot`'s setter on `class` to the proxy stored on each instance.
///
/// Runs at most once per (class, setter); later calls for the same slot key
/// are no-ops. The redirected setter finds the proxy under the key of the
/// slot that redirected it, so a slot with a different key on an already
/// redirected setter is a configuration error. With no proxy stored on the
/// receiving instance the redirected setter falls back to the superclass
/// setter.
pub fn ensure_swizzled(class: &Arc<Class>, slot: &DelegateSlot) -> Result<()> {
    if !class.is_runtime_subclass() {
        return Err(ProxyError::Configuration(format!(
            "refusing to rewrite `{}` on shared class {}",
            slot.setter(),
            class.name()
        )));
    }

    let _guard = class.lock();
    let flag = swizzled_flag(slot.setter());
    let key = slot.key();
    if let Some(owner) = class.associations().get::<AssociationKey>(&flag) {
        if *owner == key {
            return Ok(());
        }
        return Err(ProxyError::Configuration(format!(
            "`{}` on {} already redirects to proxies stored under `{}`, not `{}`",
            slot.setter(),
            class.name(),
            owner,
            key
        )));
    }

    let superclass = class.original_class();
    // Validates the selector and its calling convention before patching.
    class.lookup_setter(slot.setter())?;

    let setter = slot.setter().clone();
    let lookup_key = key.clone();
    let redirected: SetterImp = Arc::new(move |object: &Object, value: Value| {
        match object.associations().get::<DelegateProxy>(&lookup_key) {
            Some(proxy) => proxy.set_forwardee(value.into_delegate()?),
            None => superclass.lookup_setter(&setter)?(object, value),
        }
    });

    class.replace_method(slot.setter().clone(), Implementation::Setter(redirected));
    class.associations().set(flag, Arc::new(key));
    tracing::debug!("[swizzle] {} now redirects `{}`", class.name(), slot.setter());
    Ok(())
}

/// Whether `setter` has been redirected on `class`.
pub fn is_swizzled(class: &Class, setter: &Selector) -> bool {
    class.associations().contains(&swizzled_flag(setter))
}

fn swizzled_flag(setter: &Selector) -> AssociationKey {
    AssociationKey::new(format!("swizzled:{}", setter))
}
