// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Checkpoint transparency harness.
//!
//! A graph run straight through and the same graph stopped, checkpointed, and resumed
//! in a fresh instance must produce the same recorded output.

use crate::recorded::Recorded;
use crate::test_observer::TestObserver;
use crate::test_scheduler::TestScheduler;
use stateflux_core::{BoxObservable, Checkpoint, Result};

/// Subscribe `graph` now and run the scheduler until `until`.
pub fn run_to_end<R>(
    scheduler: &TestScheduler,
    graph: &BoxObservable<R>,
    until: i64,
) -> Vec<Recorded<R>>
where
    R: Clone + Send + 'static,
{
    let observer = TestObserver::new(scheduler);
    let subscription = graph.subscribe(observer.boxed());
    scheduler.advance_to(until);
    subscription.dispose();
    observer.messages()
}

/// Run a graph until `checkpoint_at`, capture it through its encoded form, dispose it,
/// then restore the checkpoint into a fresh instance and run that until `until`.
///
/// Both instances report to the same observer, whose log is returned.
///
/// # Errors
/// Returns any error raised while capturing, encoding, or restoring the checkpoint.
pub fn run_with_restore<R, F>(
    scheduler: &TestScheduler,
    make_graph: F,
    checkpoint_at: i64,
    until: i64,
) -> Result<Vec<Recorded<R>>>
where
    R: Clone + Send + 'static,
    F: Fn() -> BoxObservable<R>,
{
    let observer = TestObserver::new(scheduler);

    let first = make_graph().subscribe(observer.boxed());
    scheduler.advance_to(checkpoint_at);
    let bytes = Checkpoint::capture(&first)?.to_bytes()?;
    first.dispose();

    let second = make_graph().subscribe(observer.boxed());
    Checkpoint::from_bytes(&bytes)?.restore(&second)?;
    scheduler.advance_to(until);
    second.dispose();

    Ok(observer.messages())
}
