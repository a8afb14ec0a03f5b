// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streaming reducers over numeric sequences.
//!
//! [`Aggregate`] subscribes to exactly one source, folds every selected element into an
//! accumulator, and on completion emits exactly one value followed by `Completed`. Any
//! fault (upstream `Error`, failing selector, overflow, empty non-nullable sequence)
//! replaces both.
//!
//! The reducer is picked by type:
//!
//! | reducer | empty, non-nullable | empty, nullable |
//! |---------|---------------------|-----------------|
//! | [`Sum`] | `0` | `Some(0)` |
//! | [`Average`] | `EmptySequence` | `None` |
//! | [`Min`] / [`Max`] | `EmptySequence` | `None` |
//!
//! ```
//! use stateflux_core::{from_iter, observer_fn, Notification, Observable};
//! use stateflux_operators::{Aggregate, Average, Nullable};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let out = seen.clone();
//!
//! let source = from_iter(vec![Some(1), None, Some(4)]);
//! let average = Aggregate::<_, Average<i32, Nullable>>::new(source);
//! average.subscribe(observer_fn(move |n| out.lock().unwrap().push(n)));
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![Notification::Next(Some(2.5)), Notification::Completed]
//! );
//! ```

pub mod average;
pub mod min_max;
pub mod nullability;
pub mod numeric;
pub mod sum;

pub use average::Average;
pub use min_max::{Max, Min};
pub use nullability::{NonNullable, Nullability, Nullable};
pub use numeric::{Numeric, Scalar};
pub use sum::Sum;

use parking_lot::Mutex;
use stateflux_core::{
    debug, BoxObservable, BoxObserver, FluxError, Observable, Observer, OperatorState, Result,
    Sink, StatefulOperator, Subscription,
};
use std::sync::Arc;

/// A reducer pluggable into [`Aggregate`].
pub trait Aggregation: Send + Sync + 'static {
    /// Selected element folded into the accumulator.
    type Element: Scalar;
    type Accumulator: Send + 'static;
    /// Value emitted on completion.
    type Output: Scalar;

    /// Operator kind recorded in checkpoints.
    const KIND: &'static str;

    fn initial() -> Self::Accumulator;

    /// # Errors
    /// Returns `FluxError::Overflow` when the accumulator cannot represent the result.
    fn accumulate(acc: &mut Self::Accumulator, element: Self::Element) -> Result<()>;

    /// # Errors
    /// Returns `FluxError::EmptySequence` when no value can be produced.
    fn finish(acc: &Self::Accumulator) -> Result<Self::Output>;

    /// # Errors
    /// Returns an error if a slot cannot be encoded.
    fn save_accumulator(acc: &Self::Accumulator, state: &mut OperatorState) -> Result<()>;

    /// # Errors
    /// Returns an error if a slot is missing or malformed.
    fn load_accumulator(state: &OperatorState) -> Result<Self::Accumulator>;
}

type Selector<T, E> = Arc<dyn Fn(&T) -> Result<E> + Send + Sync>;

/// Single-source reducing operator running the aggregation `A`.
pub struct Aggregate<T, A: Aggregation> {
    source: BoxObservable<T>,
    selector: Selector<T, A::Element>,
}

impl<A: Aggregation> Aggregate<A::Element, A> {
    /// Aggregate the elements of `source` as they are.
    pub fn new(source: BoxObservable<A::Element>) -> Self {
        Self {
            source,
            selector: Arc::new(|element: &A::Element| Ok(*element)),
        }
    }
}

impl<T, A> Aggregate<T, A>
where
    T: Send + 'static,
    A: Aggregation,
{
    /// Aggregate the values `selector` picks out of each element of `source`.
    ///
    /// A selector error terminates the aggregation with that error.
    pub fn with_selector<F>(source: BoxObservable<T>, selector: F) -> Self
    where
        F: Fn(&T) -> Result<A::Element> + Send + Sync + 'static,
    {
        Self {
            source,
            selector: Arc::new(selector),
        }
    }
}

impl<T, A> Observable<A::Output> for Aggregate<T, A>
where
    T: Send + 'static,
    A: Aggregation,
{
    fn subscribe(&self, observer: BoxObserver<A::Output>) -> Subscription {
        let instance = Arc::new(Instance::<T, A> {
            sink: Sink::new(observer),
            selector: Arc::clone(&self.selector),
            state: Mutex::new(Accumulation {
                acc: A::initial(),
                terminated: false,
            }),
        });

        let subscription =
            Subscription::for_operator(instance.clone(), instance.sink.upstream().clone());
        let upstream = self.source.subscribe(instance.clone());
        instance.sink.upstream().add(upstream);
        subscription
    }
}

struct Accumulation<C> {
    acc: C,
    terminated: bool,
}

struct Instance<T, A: Aggregation> {
    sink: Sink<A::Output>,
    selector: Selector<T, A::Element>,
    state: Mutex<Accumulation<A::Accumulator>>,
}

impl<T, A: Aggregation> Instance<T, A> {
    fn fail(&self, error: FluxError) {
        {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            state.terminated = true;
        }
        debug!("{}: terminating with error: {}", A::KIND, error);
        self.sink.forward_error(error);
    }
}

impl<T, A> Observer<T> for Instance<T, A>
where
    T: Send,
    A: Aggregation,
{
    fn on_next(&self, value: T) {
        if self.sink.is_stopped() {
            return;
        }

        let element = match (self.selector)(&value) {
            Ok(element) => element,
            Err(error) => return self.fail(error),
        };

        let outcome = {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            A::accumulate(&mut state.acc, element)
        };

        if let Err(error) = outcome {
            self.fail(error);
        }
    }

    fn on_error(&self, error: FluxError) {
        self.fail(error);
    }

    fn on_completed(&self) {
        let result = {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            state.terminated = true;
            A::finish(&state.acc)
        };

        match result {
            Ok(value) => {
                self.sink.forward_next(value);
                self.sink.forward_completed();
            }
            Err(error) => {
                debug!("{}: terminating with error: {}", A::KIND, error);
                self.sink.forward_error(error);
            }
        }
    }
}

impl<T, A> StatefulOperator for Instance<T, A>
where
    T: Send,
    A: Aggregation,
{
    fn kind(&self) -> &'static str {
        A::KIND
    }

    fn save_state(&self, state: &mut OperatorState) -> Result<()> {
        let current = self.state.lock();
        A::save_accumulator(&current.acc, state)?;
        state.write("terminated", &current.terminated)
    }

    fn load_state(&self, state: &OperatorState) -> Result<()> {
        let acc = A::load_accumulator(state)?;
        let terminated: bool = state.read("terminated")?;

        *self.state.lock() = Accumulation { acc, terminated };

        if terminated {
            self.sink.stop();
        }
        Ok(())
    }
}
