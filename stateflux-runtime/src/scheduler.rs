// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{DateTime, TimeDelta, Utc};
use core::fmt::Debug;
use stateflux_core::Subscription;

/// Work item run by a scheduler when its due instant is reached.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// Clock read plus "wake me at instant" capability used by time-driven operators.
///
/// Instants are wall-clock UTC times so that a schedule saved on one machine can be
/// realigned against the clock of another.
pub trait Scheduler: Clone + Send + Sync + Debug + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// Run `action` once `due` is reached. A `due` in the past runs as soon as possible,
    /// never synchronously from inside this call.
    ///
    /// Disposing the returned subscription cancels the wake-up if it has not run yet.
    fn schedule_at(&self, due: DateTime<Utc>, action: Action) -> Subscription;

    /// Run `action` after `delay`; a negative delay means "now".
    fn schedule_after(&self, delay: TimeDelta, action: Action) -> Subscription {
        let due = self.now() + delay.max(TimeDelta::zero());
        self.schedule_at(due, action)
    }
}
