// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Event streams for intercepted delegate callbacks.

use std::sync::Arc;

use crate::core::delegates::DelegateProxy;
use crate::core::error::Result;
use crate::core::installer::DelegateSlot;
use crate::core::message::{Arguments, Selector};
use crate::core::runtime::Object;
use crate::core::stream::Events;

/// Implemented by anything that can produce the delegate proxy of a host.
///
/// The stream methods are provided. Streams emit once per delivery of the
/// selector and complete when the host object is dropped. They only
/// observe: handlers must not re-send the intercepted message to the host.
pub trait HasDelegateProxy {
    fn delegate_proxy(&self) -> Result<Arc<DelegateProxy>>;

    /// Stream of unit values, one per delivery of `selector`.
    fn trigger(&self, selector: impl Into<Selector>) -> Result<Events<()>>
    where
        Self: Sized,
    {
        let selector = selector.into();
        let proxy = self.delegate_proxy()?;
        proxy.intercept(selector.clone())?;
        Ok(proxy.subject(&selector).subscribe_map(|_| ()))
    }

    /// Stream of the bridged arguments of every delivery of `selector`.
    fn events(&self, selector: impl Into<Selector>) -> Result<Events<Arguments>>
    where
        Self: Sized,
    {
        let selector = selector.into();
        let proxy = self.delegate_proxy()?;
        proxy.intercept(selector.clone())?;
        Ok(proxy.subject(&selector).subscribe())
    }
}

impl HasDelegateProxy for Arc<DelegateProxy> {
    fn delegate_proxy(&self) -> Result<Arc<DelegateProxy>> {
        Ok(Arc::clone(self))
    }
}

/// A delegate slot bound to one host object.
///
/// Borrows the object so streams never extend its lifetime.
pub struct Reactive<'a> {
    object: &'a Arc<Object>,
    slot: &'a DelegateSlot,
}

impl<'a> Reactive<'a> {
    pub fn new(object: &'a Arc<Object>, slot: &'a DelegateSlot) -> Self {
        Self { object, slot }
    }
}

impl HasDelegateProxy for Reactive<'_> {
    fn delegate_proxy(&self) -> Result<Arc<DelegateProxy>> {
        self.slot.proxy(self.object)
    }
}
