// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

/// Result of polling an [`Events`] stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next<T> {
    Value(T),
    /// No value yet; the stream is still live.
    Pending,
    /// The stream has completed and every buffered value was consumed.
    Completed,
}

/// Subscription to a stream of values.
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct Events<T> {
    rx: Receiver<T>,
}

impl<T> Events<T> {
    pub(crate) fn new(rx: Receiver<T>) -> Self {
        Self { rx }
    }

    /// Poll without blocking.
    pub fn try_next(&self) -> Next<T> {
        match self.rx.try_recv() {
            Ok(value) => Next::Value(value),
            Err(TryRecvError::Empty) => Next::Pending,
            Err(TryRecvError::Disconnected) => Next::Completed,
        }
    }

    /// Wait up to `timeout` for the next value.
    pub fn next_timeout(&self, timeout: Duration) -> Next<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(value) => Next::Value(value),
            Err(RecvTimeoutError::Timeout) => Next::Pending,
            Err(RecvTimeoutError::Disconnected) => Next::Completed,
        }
    }

    /// Block for the next value. `None` once the stream completes.
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Values already delivered, without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Blocking iterator that ends when the stream completes.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.rx.iter()
    }

    /// Number of delivered values not yet consumed.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
