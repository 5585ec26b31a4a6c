// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Proxy installation settings, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{ProxyError, Result};

/// When a proxy re-applies itself through the original setter.
///
/// Hosts may cache which optional callbacks their delegate implements at
/// assignment time; re-applying the proxy refreshes that cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinstallPolicy {
    /// On every forwardee change and every `intercept` call.
    #[default]
    Always,
    /// On every forwardee change, and on `intercept` only when the selector
    /// was not intercepted yet.
    WhenChanged,
}

/// Settings shared by every slot installed with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Appended to a class name to name its runtime subclass.
    pub subclass_suffix: String,
    /// Prefix of the association key derived from a slot's setter.
    pub key_prefix: String,
    pub reinstall: ReinstallPolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            subclass_suffix: "_DelegateProxy".to_string(),
            key_prefix: "delegate_proxy".to_string(),
            reinstall: ReinstallPolicy::default(),
        }
    }
}

impl ProxyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ProxyError::Configuration(format!("Failed to parse proxy config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.subclass_suffix.is_empty() {
            return Err(ProxyError::Configuration(
                "subclass_suffix must not be empty".into(),
            ));
        }
        if self.key_prefix.is_empty() {
            return Err(ProxyError::Configuration("key_prefix must not be empty".into()));
        }
        Ok(())
    }
}
