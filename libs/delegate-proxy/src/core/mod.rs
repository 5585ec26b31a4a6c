// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod config;
pub mod delegates;
pub mod error;
pub mod installer;
pub mod logging;
pub mod message;
pub mod prelude;
pub mod reactive;
pub mod runtime;
pub mod stream;
pub mod swizzle;

pub use config::*;
pub use delegates::*;
pub use error::*;
pub use installer::*;
pub use message::*;
pub use reactive::*;
pub use runtime::*;
pub use stream::*;
