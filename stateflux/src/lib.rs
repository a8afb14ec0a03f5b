// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Stateflux
//!
//! A push-based reactive engine whose running operator graphs can be checkpointed and
//! restored.
//!
//! ## Overview
//!
//! Sources push notifications (`next*`, then at most one `error` or `completed`) into
//! observers. Operators are both: they observe their inputs and push results downstream.
//! Every stateful operator saves and loads its state through named slots, so a whole
//! graph can be captured into a [`Checkpoint`], shipped as bytes, and restored onto a
//! freshly built graph of the same shape.
//!
//! The crate is a facade over:
//!
//! - `stateflux-core`: the notification protocol, subscriptions, subjects and state
//! - `stateflux-runtime`: the [`Scheduler`] abstraction and the Tokio scheduler
//! - `stateflux-operators`: [`CombineLatest`] and the `Sum`, `Average`, `Min`, `Max` aggregates
//! - `stateflux-time`: the checkpointable [`Timer`]
//!
//! ## Quick Start
//!
//! ```rust
//! use stateflux::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> stateflux::Result<()> {
//! let prices = Subject::<i64>::new();
//! let volumes = Subject::<i64>::new();
//! let turnover = prices
//!     .clone()
//!     .combine_latest(vec![boxed(volumes.clone())], |v: &[i64]| Ok(v[0] * v[1]))?
//!     .aggregate::<Sum<i64>>();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! let subscription = turnover.subscribe(observer_fn(move |n: Notification<i64>| {
//!     log.lock().unwrap().push(n)
//! }));
//!
//! prices.on_next(10);
//! volumes.on_next(3);
//!
//! // The running total survives a round trip through bytes
//! let bytes = Checkpoint::capture(&subscription)?.to_bytes()?;
//! let restored = Checkpoint::from_bytes(&bytes)?;
//! assert_eq!(restored.len(), 2);
//!
//! prices.on_next(20);
//! prices.on_completed();
//! volumes.on_completed();
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![Notification::Next(90), Notification::Completed]
//! );
//! # Ok(())
//! # }
//! ```

pub use stateflux_core::{
    boxed, empty, from_iter, load, never, observer_fn, save, throw, to_stream, BoxObservable,
    BoxObserver, Checkpoint, FluxError, Notification, Observable, ObservableStream, Observer,
    OperatorState, Result, Sink, StateBlob, StateError, StatefulOperator, StreamItem, Subject,
    Subscription,
};
pub use stateflux_operators::{
    combine_latest, Aggregate, Aggregation, Average, CombineLatest, Max, Min, NonNullable,
    Nullability, Nullable, Numeric, ObservableExt, Scalar, Sum,
};
pub use stateflux_runtime::Scheduler;
#[cfg(feature = "runtime-tokio")]
pub use stateflux_runtime::TokioScheduler;
pub use stateflux_time::{realign, Realigned, Timer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        boxed, combine_latest, observer_fn, to_stream, Average, BoxObservable, Checkpoint,
        FluxError, Max, Min, Notification, Nullable, Observable, ObservableExt, Observer,
        Scheduler, StreamItem, Subject, Subscription, Sum, Timer,
    };
    #[cfg(feature = "runtime-tokio")]
    pub use crate::TokioScheduler;
}
