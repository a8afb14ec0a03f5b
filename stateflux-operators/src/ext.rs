// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregate::{Aggregate, Aggregation};
use crate::combine_latest::CombineLatest;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stateflux_core::{BoxObservable, Observable, Result};
use std::sync::Arc;

/// Method-call sugar for the operators of this crate.
///
/// ```
/// use stateflux_core::{from_iter, observer_fn, Notification, Observable};
/// use stateflux_operators::{Max, ObservableExt};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let out = seen.clone();
///
/// from_iter(vec![3, 9, 4])
///     .aggregate::<Max<i32>>()
///     .subscribe(observer_fn(move |n| out.lock().unwrap().push(n)));
///
/// assert_eq!(*seen.lock().unwrap(), vec![Notification::Next(9), Notification::Completed]);
/// ```
pub trait ObservableExt<T>: Observable<T> + Sized + 'static
where
    T: Send + 'static,
{
    /// Combine this source (first) with `others` (in order).
    ///
    /// # Errors
    /// Returns `FluxError::InvalidArgument` unless there are between 2 and 16 sources
    /// in total.
    fn combine_latest<R, F>(
        self,
        others: Vec<BoxObservable<T>>,
        combiner: F,
    ) -> Result<CombineLatest<T, R>>
    where
        T: Clone + Sync + Serialize + DeserializeOwned,
        R: Send + 'static,
        F: Fn(&[T]) -> Result<R> + Send + Sync + 'static,
    {
        let mut sources: Vec<BoxObservable<T>> = Vec::with_capacity(others.len() + 1);
        sources.push(Arc::new(self));
        sources.extend(others);
        CombineLatest::new(sources, combiner)
    }

    /// Reduce the elements of this source with `A`.
    fn aggregate<A>(self) -> Aggregate<T, A>
    where
        A: Aggregation<Element = T>,
    {
        Aggregate::new(Arc::new(self))
    }

    /// Reduce the values `selector` picks out of this source with `A`.
    fn aggregate_by<A, F>(self, selector: F) -> Aggregate<T, A>
    where
        A: Aggregation,
        F: Fn(&T) -> Result<A::Element> + Send + Sync + 'static,
    {
        Aggregate::with_selector(Arc::new(self), selector)
    }
}

impl<T, O> ObservableExt<T> for O
where
    T: Send + 'static,
    O: Observable<T> + Sized + 'static,
{
}
