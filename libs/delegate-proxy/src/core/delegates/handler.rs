// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Closure-backed delegate.

use std::collections::HashMap;

use crate::core::delegates::Delegate;
use crate::core::error::{ProxyError, Result};
use crate::core::message::{Message, Selector};

type Handler = Box<dyn Fn(&Message) -> Result<serde_json::Value> + Send + Sync>;

/// Delegate that answers exactly the selectors it has handlers for.
///
/// Receiving a selector without a handler fails with
/// [`ProxyError::Delegate`]; hosts ask `responds_to` first.
///
/// # Example
/// ```ignore
/// let delegate = HandlerDelegate::new()
///     .on("scrollViewDidEndDragging:", |_| Ok(serde_json::Value::Null));
/// ```
#[derive(Default)]
pub struct HandlerDelegate {
    handlers: HashMap<Selector, Handler>,
}

impl HandlerDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `selector`, replacing any previous handler.
    pub fn on<F>(mut self, selector: impl Into<Selector>, handler: F) -> Self
    where
        F: Fn(&Message) -> Result<serde_json::Value> + Send + Sync + 'static,
    {
        self.handlers.insert(selector.into(), Box::new(handler));
        self
    }
}

impl Delegate for HandlerDelegate {
    fn responds_to(&self, selector: &Selector) -> bool {
        self.handlers.contains_key(selector)
    }

    fn receive(&self, message: &Message) -> Result<serde_json::Value> {
        match self.handlers.get(&message.selector) {
            Some(handler) => handler(message),
            None => Err(ProxyError::Delegate {
                selector: message.selector.clone(),
                reason: "no handler registered".into(),
            }),
        }
    }
}
