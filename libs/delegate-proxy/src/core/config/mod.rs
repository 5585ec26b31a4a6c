// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod proxy_config;

pub use proxy_config::{ProxyConfig, ReinstallPolicy};
