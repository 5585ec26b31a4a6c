// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Common imports for hosts and observers.

pub use crate::core::config::{ProxyConfig, ReinstallPolicy};
pub use crate::core::delegates::{Delegate, DelegateProxy, DelegateRef, HandlerDelegate, dispatch};
pub use crate::core::error::{ProxyError, Result};
pub use crate::core::installer::{DelegateSlot, SlotKey};
pub use crate::core::message::{Arguments, Message, Selector};
pub use crate::core::reactive::{HasDelegateProxy, Reactive};
pub use crate::core::runtime::{Class, Object, Value};
pub use crate::core::stream::{Events, Next};
