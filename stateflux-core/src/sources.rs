// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold sources.
//!
//! Each subscription replays the whole sequence synchronously, from inside `subscribe`.
//! Cold sources therefore cannot be paused for a checkpoint; graphs that are restored
//! from a checkpoint are fed by hot sources such as [`Subject`](crate::Subject).

use crate::error::FluxError;
use crate::observable::{BoxObservable, Observable};
use crate::observer::BoxObserver;
use crate::subscription::Subscription;
use std::sync::Arc;

struct IterSource<T> {
    values: Vec<T>,
}

impl<T: Clone + Send + Sync> Observable<T> for IterSource<T> {
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        for value in &self.values {
            observer.on_next(value.clone());
        }
        observer.on_completed();
        Subscription::new()
    }
}

/// Emits every value of `values`, then completes.
pub fn from_iter<T, I>(values: I) -> BoxObservable<T>
where
    T: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    Arc::new(IterSource {
        values: values.into_iter().collect(),
    })
}

/// Completes immediately.
pub fn empty<T>() -> BoxObservable<T>
where
    T: Clone + Send + Sync + 'static,
{
    from_iter(Vec::new())
}

struct Never;

impl<T> Observable<T> for Never {
    fn subscribe(&self, _observer: BoxObserver<T>) -> Subscription {
        Subscription::new()
    }
}

/// Never emits anything.
pub fn never<T: 'static>() -> BoxObservable<T> {
    Arc::new(Never)
}

struct Throw {
    error: FluxError,
}

impl<T> Observable<T> for Throw {
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        observer.on_error(self.error.clone());
        Subscription::new()
    }
}

/// Fails immediately with `error`.
pub fn throw<T: 'static>(error: FluxError) -> BoxObservable<T> {
    Arc::new(Throw { error })
}
