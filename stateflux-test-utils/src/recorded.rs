// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use stateflux_core::{FluxError, Notification};

/// A notification stamped with the virtual tick at which it was observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<T> {
    pub time: i64,
    pub value: Notification<T>,
}

impl<T> Recorded<T> {
    pub fn new(time: i64, value: Notification<T>) -> Self {
        Self { time, value }
    }
}

pub fn on_next<T>(time: i64, value: T) -> Recorded<T> {
    Recorded::new(time, Notification::Next(value))
}

pub fn on_error<T>(time: i64, error: FluxError) -> Recorded<T> {
    Recorded::new(time, Notification::Error(error))
}

pub fn on_completed<T>(time: i64) -> Recorded<T> {
    Recorded::new(time, Notification::Completed)
}

/// Subscribe and unsubscribe ticks of one subscription to a hot test source.
///
/// `unsubscribe` is `None` while the subscription is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionLog {
    pub subscribe: i64,
    pub unsubscribe: Option<i64>,
}

pub fn subscribed(subscribe: i64, unsubscribe: i64) -> SubscriptionLog {
    SubscriptionLog {
        subscribe,
        unsubscribe: Some(unsubscribe),
    }
}

pub fn subscribed_open(subscribe: i64) -> SubscriptionLog {
    SubscriptionLog {
        subscribe,
        unsubscribe: None,
    }
}
