// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::fmt;

use crate::core::delegates::DelegateRef;
use crate::core::error::{ProxyError, Result};

/// Value held by, or passed through, an object property.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Delegate(DelegateRef),
    Data(serde_json::Value),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Interpret this value as an optional delegate.
    ///
    /// `Data` is a configuration error: the property was described as a
    /// delegate slot but holds something else.
    pub fn into_delegate(self) -> Result<Option<DelegateRef>> {
        match self {
            Value::Nil => Ok(None),
            Value::Delegate(delegate) => Ok(Some(delegate)),
            Value::Data(data) => Err(ProxyError::Configuration(format!(
                "expected a delegate, found data `{}`",
                data
            ))),
        }
    }

    pub fn as_delegate(&self) -> Option<&DelegateRef> {
        match self {
            Value::Delegate(delegate) => Some(delegate),
            _ => None,
        }
    }
}

impl From<Option<DelegateRef>> for Value {
    fn from(delegate: Option<DelegateRef>) -> Self {
        delegate.map_or(Value::Nil, Value::Delegate)
    }
}

impl From<DelegateRef> for Value {
    fn from(delegate: DelegateRef) -> Self {
        Value::Delegate(delegate)
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        Value::Data(data)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Delegate(delegate) => write!(f, "Delegate({:p})", delegate.as_ref()),
            Value::Data(data) => f.debug_tuple("Data").field(data).finish(),
        }
    }
}
