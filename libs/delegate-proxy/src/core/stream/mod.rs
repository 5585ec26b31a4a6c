// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod events;
mod subject;

pub use events::{Events, Next};
pub use subject::Subject;
