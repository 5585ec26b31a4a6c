// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

use crate::core::message::Selector;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid delegate slot configuration: {0}")]
    Configuration(String),

    #[error("Method not found: {class} does not implement `{selector}`")]
    MethodNotFound { class: String, selector: Selector },

    #[error("Signature mismatch: `{selector}` on {class} is not a {expected}")]
    SignatureMismatch {
        class: String,
        selector: Selector,
        expected: &'static str,
    },

    #[error("Delegate failed to handle `{selector}`: {reason}")]
    Delegate { selector: Selector, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProxyError {
    /// Whether this error reports a mis-described delegate slot.
    ///
    /// These are programmer errors: retrying cannot succeed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProxyError::Configuration(_)
                | ProxyError::MethodNotFound { .. }
                | ProxyError::SignatureMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
