// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::recorded::Recorded;
use crate::test_scheduler::TestScheduler;
use parking_lot::Mutex;
use stateflux_core::{BoxObserver, FluxError, Notification, Observer};
use std::sync::Arc;

/// Observer recording every notification with the virtual tick it arrived at.
///
/// Clones share the same log, so one observer can be subscribed to a graph, dropped into
/// it, and inspected afterwards.
pub struct TestObserver<T> {
    scheduler: TestScheduler,
    messages: Arc<Mutex<Vec<Recorded<T>>>>,
}

impl<T: Send + 'static> TestObserver<T> {
    pub fn new(scheduler: &TestScheduler) -> Self {
        Self {
            scheduler: scheduler.clone(),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle suitable for `Observable::subscribe`.
    pub fn boxed(&self) -> BoxObserver<T> {
        Arc::new(self.clone())
    }

    fn record(&self, value: Notification<T>) {
        let time = self.scheduler.now_ticks();
        self.messages.lock().push(Recorded::new(time, value));
    }
}

impl<T: Clone> TestObserver<T> {
    pub fn messages(&self) -> Vec<Recorded<T>> {
        self.messages.lock().clone()
    }

    /// Just the `Next` values, in arrival order.
    pub fn values(&self) -> Vec<T> {
        self.messages
            .lock()
            .iter()
            .filter_map(|r| r.value.clone().value())
            .collect()
    }
}

impl<T> Clone for TestObserver<T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<T: Send + 'static> Observer<T> for TestObserver<T> {
    fn on_next(&self, value: T) {
        self.record(Notification::Next(value));
    }

    fn on_error(&self, error: FluxError) {
        self.record(Notification::Error(error));
    }

    fn on_completed(&self) {
        self.record(Notification::Completed);
    }
}
