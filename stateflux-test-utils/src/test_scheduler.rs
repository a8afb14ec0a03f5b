// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::hot_observable::HotObservable;
use crate::recorded::Recorded;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use stateflux_core::Subscription;
use stateflux_runtime::{Action, Scheduler};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

struct Clock {
    now: DateTime<Utc>,
    queue: BTreeMap<(DateTime<Utc>, u64), Action>,
    next_seq: u64,
}

/// Deterministic virtual-time scheduler.
///
/// Time is measured in milliseconds ("ticks") from a fixed origin. Nothing runs until the
/// test advances the clock; queued actions then run in (due instant, FIFO) order with the
/// clock set to their due instant. Actions scheduled in the past run at the current
/// instant on the next advance.
#[derive(Clone)]
pub struct TestScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl TestScheduler {
    pub const ORIGIN: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// A scheduler whose clock starts `ticks` milliseconds after the origin.
    pub fn starting_at(ticks: i64) -> Self {
        Self {
            clock: Arc::new(Mutex::new(Clock {
                now: Self::time(ticks),
                queue: BTreeMap::new(),
                next_seq: 0,
            })),
        }
    }

    /// Wall-clock instant of a tick.
    pub fn time(ticks: i64) -> DateTime<Utc> {
        Self::ORIGIN + TimeDelta::milliseconds(ticks)
    }

    /// Tick of a wall-clock instant.
    pub fn ticks(at: DateTime<Utc>) -> i64 {
        (at - Self::ORIGIN).num_milliseconds()
    }

    pub fn now_ticks(&self) -> i64 {
        Self::ticks(self.clock.lock().now)
    }

    /// Number of queued, not yet run, actions.
    pub fn pending(&self) -> usize {
        self.clock.lock().queue.len()
    }

    /// Run everything due at or before `ticks`, then leave the clock at `ticks`.
    pub fn advance_to(&self, ticks: i64) {
        let target = Self::time(ticks);
        while let Some(action) = self.pop_due(target) {
            action();
        }

        let mut clock = self.clock.lock();
        if clock.now < target {
            clock.now = target;
        }
    }

    pub fn advance_by(&self, ticks: i64) {
        self.advance_to(self.now_ticks() + ticks);
    }

    /// Queue `action` at an absolute tick.
    pub fn schedule_at_ticks<F>(&self, ticks: i64, action: F) -> Subscription
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_at(Self::time(ticks), Box::new(action))
    }

    /// A hot source replaying `messages` at their recorded ticks.
    pub fn create_hot_observable<T>(&self, messages: Vec<Recorded<T>>) -> HotObservable<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        HotObservable::new(self.clone(), messages)
    }

    fn pop_due(&self, target: DateTime<Utc>) -> Option<Action> {
        let mut clock = self.clock.lock();
        let (&(due, seq), _) = clock.queue.first_key_value()?;
        if due > target {
            return None;
        }
        if due > clock.now {
            clock.now = due;
        }
        clock.queue.remove(&(due, seq))
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TestScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("TestScheduler")
            .field("now", &Self::ticks(clock.now))
            .field("pending", &clock.queue.len())
            .finish()
    }
}

impl Scheduler for TestScheduler {
    fn now(&self) -> DateTime<Utc> {
        self.clock.lock().now
    }

    fn schedule_at(&self, due: DateTime<Utc>, action: Action) -> Subscription {
        let key = {
            let mut clock = self.clock.lock();
            let key = (due, clock.next_seq);
            clock.next_seq += 1;
            clock.queue.insert(key, action);
            key
        };

        let weak = Arc::downgrade(&self.clock);
        Subscription::from_fn(move || {
            if let Some(clock) = weak.upgrade() {
                clock.lock().queue.remove(&key);
            }
        })
    }
}
