// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::FluxError;
use crate::observer::BoxObserver;
use crate::subscription::Subscription;

/// Downstream half of an operator instance.
///
/// A `Sink` pairs the downstream observer with the composite subscription holding
/// everything the instance owns upstream (input subscriptions, pending wake-ups). The
/// composite doubles as the "stopped" flag: once it is disposed, either by a terminal
/// message or by the downstream disposing the instance, nothing more is forwarded.
///
/// Terminal messages dispose the composite before they are delivered, and at most one
/// terminal message is ever delivered.
pub struct Sink<T> {
    downstream: BoxObserver<T>,
    upstream: Subscription,
}

impl<T> Sink<T> {
    pub fn new(downstream: BoxObserver<T>) -> Self {
        Self {
            downstream,
            upstream: Subscription::new(),
        }
    }

    /// Composite owning the instance's upstream resources.
    pub fn upstream(&self) -> &Subscription {
        &self.upstream
    }

    pub fn is_stopped(&self) -> bool {
        self.upstream.is_disposed()
    }

    pub fn forward_next(&self, value: T) {
        if !self.is_stopped() {
            self.downstream.on_next(value);
        }
    }

    pub fn forward_error(&self, error: FluxError) {
        if self.upstream.try_dispose() {
            self.downstream.on_error(error);
        }
    }

    pub fn forward_completed(&self) {
        if self.upstream.try_dispose() {
            self.downstream.on_completed();
        }
    }

    /// Release upstream resources without delivering anything.
    pub fn stop(&self) {
        self.upstream.dispose();
    }
}
