// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Multicast subject with explicit completion

use parking_lot::Mutex;

use super::events::Events;

/// Returns `false` once its subscriber has gone away.
type Observer<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Pushes every value to all live subscribers until completed.
///
/// - Each subscriber gets its own unbounded channel; `send` never blocks
/// - Dropped subscribers are pruned on the next `send`
/// - `complete` disconnects every subscriber; later subscribers start completed
pub struct Subject<T> {
    /// `None` once completed
    observers: Mutex<Option<Vec<Observer<T>>>>,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self {
            observers: Mutex::new(Some(Vec::new())),
        }
    }
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe, receiving values transformed by `map`.
    pub fn subscribe_map<U, F>(&self, map: F) -> Events<U>
    where
        U: Send + 'static,
        F: Fn(&T) -> U + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        if let Some(observers) = self.observers.lock().as_mut() {
            observers.push(Box::new(move |value| tx.send(map(value)).is_ok()));
        }
        // Completed: `tx` is dropped here, so the receiver starts disconnected.
        Events::new(rx)
    }

    /// Push `value` to every live subscriber. Returns how many received it.
    pub fn send(&self, value: &T) -> usize {
        match self.observers.lock().as_mut() {
            Some(observers) => {
                observers.retain(|observer| observer(value));
                observers.len()
            }
            None => 0,
        }
    }

    /// Disconnect every subscriber. Idempotent.
    pub fn complete(&self) {
        let observers = self.observers.lock().take();
        if let Some(observers) = observers {
            tracing::trace!("[stream] Completing subject with {} subscribers", observers.len());
        }
    }

    pub fn is_completed(&self) -> bool {
        self.observers.lock().is_none()
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.lock().as_ref().map_or(0, Vec::len)
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub fn subscribe(&self) -> Events<T> {
        self.subscribe_map(T::clone)
    }
}
