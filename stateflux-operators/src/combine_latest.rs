// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! N-ary combine-latest.
//!
//! Each input owns one slot holding its latest ("latched") value and whether it has
//! completed. Once every slot holds a value, every `Next` from any input recombines the
//! full slot vector and emits the result at that instant.
//!
//! ## Termination
//!
//! - An `Error` from any input, or a failing combiner, terminates immediately.
//! - When every input has completed, the operator completes.
//! - An input that completed without ever emitting is *barren*: no combination can ever
//!   be produced again. The operator notices this the next time a `Next` arrives on a
//!   sibling while some slot is still empty, and completes at that instant. A completion
//!   on its own never triggers the check.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stateflux_core::{
    debug, BoxObservable, BoxObserver, FluxError, Observable, Observer, OperatorState, Result,
    Sink, StateError, StatefulOperator, Subscription,
};
use std::sync::Arc;

type Combiner<T, R> = Arc<dyn Fn(&[T]) -> Result<R> + Send + Sync>;

/// Operator combining the latest values of 2 to 16 inputs.
///
/// # Example
///
/// ```
/// use stateflux_core::{boxed, observer_fn, Notification, Observable, Observer, Subject};
/// use stateflux_operators::CombineLatest;
/// use std::sync::{Arc, Mutex};
///
/// let a = Subject::<i32>::new();
/// let b = Subject::<i32>::new();
/// let sum = CombineLatest::new(
///     vec![boxed(a.clone()), boxed(b.clone())],
///     |values: &[i32]| Ok(values.iter().sum::<i32>()),
/// )
/// .unwrap();
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let out = seen.clone();
/// let _subscription = sum.subscribe(observer_fn(move |n| out.lock().unwrap().push(n)));
///
/// a.on_next(1);
/// b.on_next(10);
/// a.on_next(2);
///
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![Notification::Next(11), Notification::Next(12)]
/// );
/// ```
pub struct CombineLatest<T, R> {
    sources: Vec<BoxObservable<T>>,
    combiner: Combiner<T, R>,
}

impl<T, R> CombineLatest<T, R>
where
    T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
    R: Send + 'static,
{
    pub const MIN_SOURCES: usize = 2;
    pub const MAX_SOURCES: usize = 16;

    /// Combine `sources` with `combiner`, which receives one value per source in source
    /// order.
    ///
    /// # Errors
    /// Returns `FluxError::InvalidArgument` unless there are between 2 and 16 sources.
    pub fn new<F>(sources: Vec<BoxObservable<T>>, combiner: F) -> Result<Self>
    where
        F: Fn(&[T]) -> Result<R> + Send + Sync + 'static,
    {
        if !(Self::MIN_SOURCES..=Self::MAX_SOURCES).contains(&sources.len()) {
            return Err(FluxError::invalid_argument(format!(
                "combine_latest takes {} to {} sources, got {}",
                Self::MIN_SOURCES,
                Self::MAX_SOURCES,
                sources.len()
            )));
        }

        Ok(Self {
            sources,
            combiner: Arc::new(combiner),
        })
    }

    pub fn arity(&self) -> usize {
        self.sources.len()
    }
}

/// Boxed form of [`CombineLatest::new`].
///
/// # Errors
/// Returns `FluxError::InvalidArgument` unless there are between 2 and 16 sources.
pub fn combine_latest<T, R, F>(
    sources: Vec<BoxObservable<T>>,
    combiner: F,
) -> Result<BoxObservable<R>>
where
    T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
    R: Send + 'static,
    F: Fn(&[T]) -> Result<R> + Send + Sync + 'static,
{
    Ok(Arc::new(CombineLatest::new(sources, combiner)?))
}

impl<T, R> Observable<R> for CombineLatest<T, R>
where
    T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
    R: Send + 'static,
{
    fn subscribe(&self, observer: BoxObserver<R>) -> Subscription {
        let instance = Arc::new(Instance {
            sink: Sink::new(observer),
            combiner: Arc::clone(&self.combiner),
            slots: Mutex::new(Slots::new(self.sources.len())),
        });

        let subscription =
            Subscription::for_operator(instance.clone(), instance.sink.upstream().clone());

        for (index, source) in self.sources.iter().enumerate() {
            if instance.sink.is_stopped() {
                break;
            }
            let input = Arc::new(Input {
                index,
                instance: Arc::clone(&instance),
            });
            let upstream = source.subscribe(input);
            instance.sink.upstream().add(upstream);
        }

        subscription
    }
}

struct Slots<T> {
    values: Vec<Option<T>>,
    completed: Vec<bool>,
    terminated: bool,
}

impl<T: Clone> Slots<T> {
    fn new(arity: usize) -> Self {
        Self {
            values: vec![None; arity],
            completed: vec![false; arity],
            terminated: false,
        }
    }

    /// Every latched value, if every slot holds one.
    fn latest(&self) -> Option<Vec<T>> {
        self.values.iter().cloned().collect()
    }

    fn barren(&self) -> Option<usize> {
        self.values
            .iter()
            .zip(&self.completed)
            .position(|(value, completed)| *completed && value.is_none())
    }
}

enum Step<T> {
    Wait,
    Combine(Vec<T>),
    Complete,
}

struct Instance<T, R> {
    sink: Sink<R>,
    combiner: Combiner<T, R>,
    slots: Mutex<Slots<T>>,
}

impl<T: Clone, R> Instance<T, R> {
    fn on_input_next(&self, index: usize, value: T) {
        if self.sink.is_stopped() {
            return;
        }

        let step = {
            let mut slots = self.slots.lock();
            if slots.terminated {
                return;
            }
            slots.values[index] = Some(value);

            match slots.latest() {
                Some(values) => Step::Combine(values),
                None => match slots.barren() {
                    Some(barren) => {
                        debug!("combine_latest: input {} is barren, completing", barren);
                        slots.terminated = true;
                        Step::Complete
                    }
                    None => Step::Wait,
                },
            }
        };

        match step {
            Step::Wait => {}
            Step::Combine(values) => match (self.combiner)(&values) {
                Ok(result) => self.sink.forward_next(result),
                Err(error) => {
                    debug!("combine_latest: combiner failed: {}", error);
                    self.fail(error);
                }
            },
            Step::Complete => self.sink.forward_completed(),
        }
    }

    fn on_input_completed(&self, index: usize) {
        let all_completed = {
            let mut slots = self.slots.lock();
            if slots.terminated {
                return;
            }
            slots.completed[index] = true;
            slots.terminated = slots.completed.iter().all(|c| *c);
            slots.terminated
        };

        if all_completed {
            self.sink.forward_completed();
        }
    }

    fn fail(&self, error: FluxError) {
        self.slots.lock().terminated = true;
        self.sink.forward_error(error);
    }
}

impl<T, R> StatefulOperator for Instance<T, R>
where
    T: Clone + Send + Sync + Serialize + DeserializeOwned,
    R: Send,
{
    fn kind(&self) -> &'static str {
        "stateflux/combine_latest"
    }

    fn save_state(&self, state: &mut OperatorState) -> Result<()> {
        let slots = self.slots.lock();
        state.write("arity", &(slots.values.len() as u64))?;
        state.write("values", &slots.values)?;
        state.write("completed", &slots.completed)?;
        state.write("terminated", &slots.terminated)
    }

    fn load_state(&self, state: &OperatorState) -> Result<()> {
        let values: Vec<Option<T>> = state.read("values")?;
        let completed: Vec<bool> = state.read("completed")?;
        let terminated: bool = state.read("terminated")?;

        let terminated = {
            let mut slots = self.slots.lock();
            let arity = slots.values.len();
            let found = state.read::<u64>("arity")? as usize;
            if found != arity || values.len() != arity || completed.len() != arity {
                return Err(StateError::ArityMismatch {
                    expected: arity,
                    found,
                }
                .into());
            }

            *slots = Slots {
                values,
                completed,
                terminated,
            };
            slots.terminated
        };

        if terminated {
            self.sink.stop();
        }
        Ok(())
    }
}

struct Input<T, R> {
    index: usize,
    instance: Arc<Instance<T, R>>,
}

impl<T, R> Observer<T> for Input<T, R>
where
    T: Clone + Send + Sync,
    R: Send,
{
    fn on_next(&self, value: T) {
        self.instance.on_input_next(self.index, value);
    }

    fn on_error(&self, error: FluxError) {
        debug!("combine_latest: input {} failed: {}", self.index, error);
        self.instance.fail(error);
    }

    fn on_completed(&self) {
        self.instance.on_input_completed(self.index);
    }
}
