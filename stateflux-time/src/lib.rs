// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Checkpointable timers.
//!
//! A [`Timer`] is a source that emits the tick index `0, 1, 2, ...` at its due instants,
//! once or periodically, on any [`Scheduler`](stateflux_runtime::Scheduler).
//!
//! Its schedule is part of the checkpointed state. Restoring a periodic timer whose next
//! tick was missed while the graph was unloaded does not replay every missed tick: the
//! most recent missed tick fires once immediately, the older ones are skipped, and the
//! schedule is realigned to the original period grid.
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::TimeDelta;
//! use stateflux_core::{to_stream, StreamItem};
//! use stateflux_runtime::TokioScheduler;
//! use stateflux_time::Timer;
//! use futures::StreamExt;
//!
//! # async fn example() -> stateflux_core::Result<()> {
//! let period = TimeDelta::milliseconds(10);
//! let ticks = Timer::periodic_after(TokioScheduler, period, period)?;
//! let first: Vec<StreamItem<i64>> = to_stream(ticks).take(3).collect().await;
//! assert_eq!(first, vec![StreamItem::Value(0), StreamItem::Value(1), StreamItem::Value(2)]);
//! # Ok(())
//! # }
//! ```

pub mod schedule;
pub mod timer;

pub use schedule::{realign, Realigned};
pub use timer::Timer;
