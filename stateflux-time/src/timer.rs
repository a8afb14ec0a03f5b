// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::schedule::realign;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use stateflux_core::{
    debug, info, BoxObserver, FluxError, Observable, OperatorState, Result, Sink,
    StatefulOperator, Subscription,
};
use stateflux_runtime::Scheduler;
use std::sync::{Arc, Weak};

#[derive(Debug, Clone, Copy)]
enum Due {
    At(DateTime<Utc>),
    After(TimeDelta),
}

/// Source emitting tick indices at wall-clock due instants.
///
/// A one-shot timer emits `0` then completes. A periodic timer emits `0, 1, 2, ...` at
/// `due, due + period, due + 2 * period, ...` and never completes. Relative due times
/// are resolved against the scheduler clock when subscribing.
///
/// Each subscription is a stateful operator saving its next due instant, the next tick
/// index, and any pending catch-up tick. The period is a construction parameter and is
/// not saved.
#[derive(Debug, Clone)]
pub struct Timer<S> {
    scheduler: S,
    due: Due,
    period: Option<TimeDelta>,
}

impl<S: Scheduler> Timer<S> {
    /// Emit `0` at `due`, then complete. A `due` in the past fires as soon as possible.
    pub fn once_at(scheduler: S, due: DateTime<Utc>) -> Self {
        Self {
            scheduler,
            due: Due::At(due),
            period: None,
        }
    }

    /// Emit `0` once `delay` has elapsed, then complete. A negative delay means "now".
    pub fn once_after(scheduler: S, delay: TimeDelta) -> Self {
        Self {
            scheduler,
            due: Due::After(delay),
            period: None,
        }
    }

    /// Emit the tick index at `due` and every `period` after it.
    ///
    /// # Errors
    /// Returns `FluxError::InvalidArgument` unless `period` is strictly positive.
    pub fn periodic_at(scheduler: S, due: DateTime<Utc>, period: TimeDelta) -> Result<Self> {
        Ok(Self {
            scheduler,
            due: Due::At(due),
            period: Some(validate_period(period)?),
        })
    }

    /// Emit the tick index once `delay` has elapsed and every `period` after that.
    ///
    /// # Errors
    /// Returns `FluxError::InvalidArgument` unless `period` is strictly positive.
    pub fn periodic_after(scheduler: S, delay: TimeDelta, period: TimeDelta) -> Result<Self> {
        Ok(Self {
            scheduler,
            due: Due::After(delay),
            period: Some(validate_period(period)?),
        })
    }

    pub fn period(&self) -> Option<TimeDelta> {
        self.period
    }
}

fn validate_period(period: TimeDelta) -> Result<TimeDelta> {
    if period <= TimeDelta::zero() {
        return Err(FluxError::invalid_argument(format!(
            "timer period must be positive, got {period}"
        )));
    }
    Ok(period)
}

impl<S: Scheduler> Observable<i64> for Timer<S> {
    fn subscribe(&self, observer: BoxObserver<i64>) -> Subscription {
        let due = match self.due {
            Due::At(due) => due,
            Due::After(delay) => {
                let now = self.scheduler.now();
                now.checked_add_signed(delay.max(TimeDelta::zero()))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            }
        };

        let instance = Arc::new_cyclic(|this| Instance {
            this: this.clone(),
            sink: Sink::new(observer),
            scheduler: self.scheduler.clone(),
            period: self.period,
            schedule: Mutex::new(Schedule {
                due,
                ticks_fired: 0,
                catch_up: None,
                terminated: false,
            }),
            wake_up: Arc::new(Mutex::new(None)),
        });

        let subscription =
            Subscription::for_operator(instance.clone(), instance.sink.upstream().clone());

        let wake_up = Arc::clone(&instance.wake_up);
        instance.sink.upstream().add(Subscription::from_fn(move || {
            if let Some(pending) = wake_up.lock().take() {
                pending.dispose();
            }
        }));

        instance.wake_at(due);
        subscription
    }
}

struct Schedule {
    due: DateTime<Utc>,
    ticks_fired: i64,
    catch_up: Option<i64>,
    terminated: bool,
}

enum Then {
    WakeAt(DateTime<Utc>),
    Complete,
}

struct Instance<S> {
    this: Weak<Instance<S>>,
    sink: Sink<i64>,
    scheduler: S,
    period: Option<TimeDelta>,
    schedule: Mutex<Schedule>,
    wake_up: Arc<Mutex<Option<Subscription>>>,
}

impl<S: Scheduler> Instance<S> {
    /// Replace the pending wake-up with one at `at`.
    fn wake_at(&self, at: DateTime<Utc>) {
        if self.sink.is_stopped() {
            return;
        }

        // the queued wake-up owns the instance until it runs or is cancelled
        let Some(instance) = self.this.upgrade() else {
            return;
        };
        let pending = self
            .scheduler
            .schedule_at(at, Box::new(move || instance.fire()));

        let previous = self.wake_up.lock().replace(pending);
        if let Some(previous) = previous {
            previous.dispose();
        }

        // disposal may have raced with the registration above
        if self.sink.is_stopped() {
            self.cancel_wake_up();
        }
    }

    fn cancel_wake_up(&self) {
        let pending = self.wake_up.lock().take();
        if let Some(pending) = pending {
            pending.dispose();
        }
    }

    fn fire(&self) {
        if self.sink.is_stopped() {
            return;
        }

        let step = {
            let mut schedule = self.schedule.lock();
            if schedule.terminated {
                return;
            }
            Self::advance(&mut schedule, self.period)
        };

        match step {
            Ok((tick, Then::WakeAt(next))) => {
                self.sink.forward_next(tick);
                self.wake_at(next);
            }
            Ok((tick, Then::Complete)) => {
                self.sink.forward_next(tick);
                self.sink.forward_completed();
            }
            Err(error) => {
                self.schedule.lock().terminated = true;
                self.sink.forward_error(error);
            }
        }
    }

    fn advance(schedule: &mut Schedule, period: Option<TimeDelta>) -> Result<(i64, Then)> {
        if let Some(tick) = schedule.catch_up.take() {
            return Ok((tick, Then::WakeAt(schedule.due)));
        }

        let tick = schedule.ticks_fired;
        schedule.ticks_fired = tick
            .checked_add(1)
            .ok_or_else(|| FluxError::overflow("timer tick counter"))?;

        match period {
            Some(period) => {
                schedule.due = schedule
                    .due
                    .checked_add_signed(period)
                    .ok_or_else(|| FluxError::overflow("timer due instant"))?;
                Ok((tick, Then::WakeAt(schedule.due)))
            }
            None => {
                schedule.terminated = true;
                Ok((tick, Then::Complete))
            }
        }
    }
}

impl<S: Scheduler> StatefulOperator for Instance<S> {
    fn kind(&self) -> &'static str {
        "stateflux/timer"
    }

    fn save_state(&self, state: &mut OperatorState) -> Result<()> {
        let schedule = self.schedule.lock();
        state.write("due", &schedule.due)?;
        state.write("ticks_fired", &schedule.ticks_fired)?;
        state.write("catch_up", &schedule.catch_up)?;
        state.write("terminated", &schedule.terminated)
    }

    fn load_state(&self, state: &OperatorState) -> Result<()> {
        let due: DateTime<Utc> = state.read("due")?;
        let ticks_fired: i64 = state.read("ticks_fired")?;
        let saved_catch_up: Option<i64> = state.read("catch_up")?;
        let terminated: bool = state.read("terminated")?;

        self.cancel_wake_up();

        if terminated {
            self.schedule.lock().terminated = true;
            self.sink.stop();
            return Ok(());
        }

        let now = self.scheduler.now();
        let realigned = realign(due, self.period, ticks_fired, now)?;
        if realigned.skipped > 0 {
            info!(
                "timer: skipped {} ticks missed while unloaded, resuming at tick {}",
                realigned.skipped, realigned.ticks_fired
            );
        }

        let catch_up = realigned.catch_up.or(saved_catch_up);
        *self.schedule.lock() = Schedule {
            due: realigned.due,
            ticks_fired: realigned.ticks_fired,
            catch_up,
            terminated: false,
        };

        let first = if catch_up.is_some() { now } else { realigned.due };
        debug!("timer: restored, next wake-up at {}", first);
        self.wake_at(first);
        Ok(())
    }
}
