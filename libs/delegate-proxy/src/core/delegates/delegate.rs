// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Delegate capability trait and the generic dispatch path.

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::message::{Message, Selector};

/// Shared handle to a delegate.
pub type DelegateRef = Arc<dyn Delegate>;

/// An object that receives callback-style messages from a host object.
///
/// Hosts ask `responds_to` before dispatching optional callbacks, then go
/// through [`dispatch`], which honours `forwarding_target` before falling
/// back to `receive`.
///
/// A blanket implementation is provided for `Arc<dyn Delegate>`,
/// so you can pass an Arc directly where a `Delegate` is expected.
pub trait Delegate: Send + Sync {
    /// Whether this delegate handles `selector`.
    fn responds_to(&self, selector: &Selector) -> bool;

    /// Another delegate that should receive `selector` instead of this one.
    ///
    /// `None` means "handle locally": the message is passed to `receive`.
    fn forwarding_target(&self, _selector: &Selector) -> Option<DelegateRef> {
        None
    }

    /// Handle a message. Callbacks without a return value reply `Null`.
    fn receive(&self, message: &Message) -> Result<serde_json::Value>;

    /// Address of the object that actually handles messages.
    ///
    /// Wrappers that only pass calls through must return the wrapped
    /// delegate's identity.
    fn identity(&self) -> *const () {
        self as *const Self as *const ()
    }
}

// =============================================================================
// Blanket implementation for Arc wrapper
// =============================================================================

impl Delegate for Arc<dyn Delegate> {
    fn responds_to(&self, selector: &Selector) -> bool {
        (**self).responds_to(selector)
    }

    fn forwarding_target(&self, selector: &Selector) -> Option<DelegateRef> {
        (**self).forwarding_target(selector)
    }

    fn receive(&self, message: &Message) -> Result<serde_json::Value> {
        (**self).receive(message)
    }

    fn identity(&self) -> *const () {
        (**self).identity()
    }
}

/// Deliver `message` to `delegate` the way a host object would.
///
/// Returns `Ok(None)` when the delegate does not respond to the selector.
pub fn dispatch(delegate: &dyn Delegate, message: &Message) -> Result<Option<serde_json::Value>> {
    if !delegate.responds_to(&message.selector) {
        tracing::trace!("[dispatch] `{}` not handled", message.selector);
        return Ok(None);
    }

    match delegate.forwarding_target(&message.selector) {
        Some(target) => dispatch(target.as_ref(), message),
        None => delegate.receive(message).map(Some),
    }
}

/// Whether `delegate` and `other` are the same object, looking through
/// `Arc` wrappers.
pub fn same_delegate(delegate: &dyn Delegate, other: &dyn Delegate) -> bool {
    std::ptr::eq(delegate.identity(), other.identity())
}
