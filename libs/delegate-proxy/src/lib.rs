// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Observe the callbacks an object sends to its delegate without touching
//! the delegate.
//!
//! A [`DelegateProxy`] is installed in a host object's delegate slot. It
//! answers intercepted selectors itself, publishing each delivery to event
//! streams, and forwards everything else to the real delegate. Assignments
//! made later through the slot's ordinary setter update the proxy's
//! forwardee instead of replacing the proxy.
//!
//! ```ignore
//! use delegate_proxy::prelude::*;
//!
//! let slot = DelegateSlot::new("delegate", "setDelegate:");
//! let scrolls = slot.reactive(&scroll_view).events("scrollViewDidScroll:")?;
//! ```

pub mod core;

pub use crate::core::prelude;
pub use crate::core::{
    Arguments, Class, Delegate, DelegateProxy, DelegateRef, DelegateSlot, Events,
    HandlerDelegate, HasDelegateProxy, Message, Next, Object, ProxyConfig, ProxyError,
    Reactive, ReinstallPolicy, Result, Selector, SlotKey, Value, dispatch,
};
