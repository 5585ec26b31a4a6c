// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use parking_lot::Mutex;

type EndedObserver = Box<dyn FnOnce() + Send>;

/// Handle to the lifetime of an [`Object`](super::Object).
///
/// Cloning shares the same lifetime. Observers run once, on the thread
/// that drops the owning object.
#[derive(Clone)]
pub struct Lifetime {
    // `None` once ended
    observers: Arc<Mutex<Option<Vec<EndedObserver>>>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    pub fn has_ended(&self) -> bool {
        self.observers.lock().is_none()
    }

    /// Run `observer` when the lifetime ends, or right away if it already has.
    pub fn observe_ended<F>(&self, observer: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut observers = self.observers.lock();
        match observers.as_mut() {
            Some(pending) => pending.push(Box::new(observer)),
            None => {
                drop(observers);
                observer();
            }
        }
    }

    pub(crate) fn end(&self) {
        // Release the lock before running observers; they may observe again.
        let pending = self.observers.lock().take();
        for observer in pending.into_iter().flatten() {
            observer();
        }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifetime")
            .field("ended", &self.has_ended())
            .finish()
    }
}
