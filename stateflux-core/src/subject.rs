// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`Subject`] is both an [`Observer`] and an [`Observable`]: every notification pushed
//! into it is broadcast to the observers subscribed at that moment.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers do not receive past values.
//! - **Terminal replay**: subscribing after termination immediately delivers the terminal
//!   notification.
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//! - **Re-entrant**: delivery happens outside the internal lock, so observers may
//!   subscribe or dispose while being notified.
//!
//! ## Example
//!
//! ```
//! use stateflux_core::{observer_fn, Notification, Observable, Observer, Subject};
//! use std::sync::{Arc, Mutex};
//!
//! let subject = Subject::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let subscription = subject.subscribe(observer_fn(move |n| sink.lock().unwrap().push(n)));
//! subject.on_next(1);
//! subscription.dispose();
//! subject.on_next(2);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Notification::Next(1)]);
//! ```

use crate::error::FluxError;
use crate::notification::Notification;
use crate::observable::Observable;
use crate::observer::{BoxObserver, Observer};
use crate::subscription::Subscription;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

struct SubjectState<T> {
    terminal: Option<Notification<T>>,
    observers: Vec<(u64, BoxObserver<T>)>,
    next_id: u64,
}

pub struct Subject<T> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                terminal: None,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Returns `true` once an `Error` or `Completed` has been pushed.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Number of currently subscribed observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    fn snapshot(&self) -> Option<Vec<BoxObserver<T>>> {
        let state = self.state.lock();
        if state.terminal.is_some() {
            return None;
        }
        Some(state.observers.iter().map(|(_, o)| Arc::clone(o)).collect())
    }

    fn terminate(&self, terminal: Notification<T>) -> Option<Vec<BoxObserver<T>>> {
        let mut state = self.state.lock();
        if state.terminal.is_some() {
            return None;
        }
        state.terminal = Some(terminal);
        Some(state.observers.drain(..).map(|(_, o)| o).collect())
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + 'static> Observer<T> for Subject<T> {
    fn on_next(&self, value: T) {
        if let Some(observers) = self.snapshot() {
            for observer in observers {
                observer.on_next(value.clone());
            }
        }
    }

    fn on_error(&self, error: FluxError) {
        if let Some(observers) = self.terminate(Notification::Error(error.clone())) {
            for observer in observers {
                observer.on_error(error.clone());
            }
        }
    }

    fn on_completed(&self) {
        if let Some(observers) = self.terminate(Notification::Completed) {
            for observer in observers {
                observer.on_completed();
            }
        }
    }
}

impl<T: Clone + Send + 'static> Observable<T> for Subject<T> {
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        let mut state = self.state.lock();

        if let Some(terminal) = state.terminal.clone() {
            drop(state);
            observer.notify(terminal);
            return Subscription::new();
        }

        let id = state.next_id;
        state.next_id += 1;
        state.observers.push((id, observer));
        drop(state);

        let weak: Weak<Mutex<SubjectState<T>>> = Arc::downgrade(&self.state);
        Subscription::from_fn(move || {
            if let Some(state) = weak.upgrade() {
                state.lock().observers.retain(|(other, _)| *other != id);
            }
        })
    }
}
