// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for stateflux operators.
//!
//! Everything here runs on virtual time: a [`TestScheduler`] owns the clock, hot sources
//! replay recorded notifications at fixed ticks, and a [`TestObserver`] records what a
//! graph emits and when. Designed for development and testing only.
//!
//! # Example
//!
//! ```rust
//! use stateflux_core::Observable;
//! use stateflux_test_utils::{on_completed, on_next, subscribed, TestObserver, TestScheduler};
//!
//! let scheduler = TestScheduler::new();
//! let source = scheduler.create_hot_observable(vec![on_next(100, 1), on_completed(200)]);
//! let observer = TestObserver::new(&scheduler);
//!
//! let subscription = source.subscribe(observer.boxed());
//! scheduler.advance_to(300);
//! subscription.dispose();
//!
//! assert_eq!(observer.messages(), vec![on_next(100, 1), on_completed(200)]);
//! assert_eq!(source.subscriptions(), vec![subscribed(0, 300)]);
//! ```

pub mod harness;
pub mod hot_observable;
pub mod recorded;
pub mod test_observer;
pub mod test_scheduler;

pub use harness::{run_to_end, run_with_restore};
pub use hot_observable::HotObservable;
pub use recorded::{
    on_completed, on_error, on_next, subscribed, subscribed_open, Recorded, SubscriptionLog,
};
pub use test_observer::TestObserver;
pub use test_scheduler::TestScheduler;
