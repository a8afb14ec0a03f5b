// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::FluxError;
use crate::notification::Notification;
use std::sync::Arc;

/// Receiver side of the notification protocol.
///
/// Callers must not deliver two notifications to the same observer concurrently and must
/// not deliver anything after `on_error` or `on_completed`. Operators built on
/// [`Sink`](crate::Sink) enforce the second rule towards their own downstream.
pub trait Observer<T>: Send + Sync {
    /// Delivers a value.
    fn on_next(&self, value: T);

    /// Delivers a terminal fault.
    fn on_error(&self, error: FluxError);

    /// Delivers successful termination.
    fn on_completed(&self);

    /// Dispatches a [`Notification`] to the matching callback.
    fn notify(&self, notification: Notification<T>) {
        match notification {
            Notification::Next(v) => self.on_next(v),
            Notification::Error(e) => self.on_error(e),
            Notification::Completed => self.on_completed(),
        }
    }
}

/// Shared, type-erased observer handle.
pub type BoxObserver<T> = Arc<dyn Observer<T>>;

/// Observer built from a single closure receiving every notification.
pub struct FnObserver<F> {
    f: F,
}

impl<F> FnObserver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Observer<T> for FnObserver<F>
where
    F: Fn(Notification<T>) + Send + Sync,
{
    fn on_next(&self, value: T) {
        (self.f)(Notification::Next(value));
    }

    fn on_error(&self, error: FluxError) {
        (self.f)(Notification::Error(error));
    }

    fn on_completed(&self) {
        (self.f)(Notification::Completed);
    }
}

/// Wraps a closure into a shared observer.
///
/// ```
/// use stateflux_core::{observer_fn, Notification, Observer};
///
/// let observer = observer_fn(|n: Notification<i32>| {
///     if let Notification::Next(v) = n {
///         assert_eq!(v, 7);
///     }
/// });
/// observer.on_next(7);
/// ```
pub fn observer_fn<T, F>(f: F) -> BoxObserver<T>
where
    T: 'static,
    F: Fn(Notification<T>) + Send + Sync + 'static,
{
    Arc::new(FnObserver::new(f))
}
