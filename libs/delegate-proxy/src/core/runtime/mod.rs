// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Minimal dynamic object model hosting delegate slots.
//!
//! Provides the reflection primitives the installer needs:
//! - Classes with method tables, superclass lookup and runtime subclasses
//! - Instances whose dynamic class can be swapped
//! - Per-object and per-class associated storage and re-entrant locks
//! - Lifetime notification when an instance is dropped

mod associations;
mod class;
mod lifetime;
mod object;
mod value;

pub use associations::{AssociationKey, Associations};
pub use class::{Class, GetterImp, Implementation, SetterImp};
pub use lifetime::Lifetime;
pub use object::Object;
pub use value::Value;
