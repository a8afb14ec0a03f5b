// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observer::BoxObserver;
use crate::subscription::Subscription;
use std::sync::Arc;

/// Source side of the notification protocol.
///
/// Every call to `subscribe` creates an independent operator instance (with its own state)
/// wired to `observer`. The returned [`Subscription`] is exclusively owned by the caller;
/// disposing it tears down that instance and, transitively, every subscription the
/// instance opened on its inputs.
pub trait Observable<T>: Send + Sync {
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription;
}

/// Shared, type-erased observable handle.
pub type BoxObservable<T> = Arc<dyn Observable<T>>;

impl<T, O> Observable<T> for Arc<O>
where
    O: Observable<T> + ?Sized,
{
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        (**self).subscribe(observer)
    }
}

/// Erases the concrete observable type.
pub fn boxed<T, O>(observable: O) -> BoxObservable<T>
where
    O: Observable<T> + 'static,
{
    Arc::new(observable)
}
