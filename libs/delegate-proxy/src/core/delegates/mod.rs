// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Delegates and the proxy that stands in for them.
//!
//! - Delegate: the capability a host object dispatches callbacks to
//! - HandlerDelegate: closure-backed delegate for hosts and tests
//! - DelegateProxy: selectively intercepting stand-in for a real delegate

mod delegate;
mod handler;
mod proxy;

pub use delegate::{Delegate, DelegateRef, dispatch, same_delegate};
pub use handler::HandlerDelegate;
pub use proxy::{DelegateProxy, ReinstallFn};
