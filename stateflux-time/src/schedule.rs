// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Restore-time realignment of a saved timer schedule against the current clock.

use chrono::{DateTime, TimeDelta, Utc};
use stateflux_core::{FluxError, Result};

/// Schedule a timer resumes with after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Realigned {
    /// Instant of the next regular tick.
    pub due: DateTime<Utc>,
    /// Index of the next regular tick.
    pub ticks_fired: i64,
    /// Missed tick to emit immediately, ahead of the next regular tick.
    pub catch_up: Option<i64>,
    /// Missed ticks that will never be emitted.
    pub skipped: i64,
}

/// Realign a saved schedule to `now`.
///
/// - A tick that is not yet due keeps its instant.
/// - An overdue one-shot tick fires at `now`.
/// - An overdue periodic tick moves to the first instant `due + k * period >= now`. When
///   that instant is `now` itself, the tick fires there normally and the `k` earlier
///   ticks are skipped. Otherwise the latest missed tick is emitted immediately as a
///   catch-up and the `k - 1` before it are skipped.
///
/// Tick indices keep counting grid slots, so the next regular tick is always
/// `ticks_fired + k`.
///
/// # Errors
/// Returns `FluxError::Overflow` if the realigned instant or tick index is not
/// representable.
pub fn realign(
    due: DateTime<Utc>,
    period: Option<TimeDelta>,
    ticks_fired: i64,
    now: DateTime<Utc>,
) -> Result<Realigned> {
    let on_time = Realigned {
        due,
        ticks_fired,
        catch_up: None,
        skipped: 0,
    };

    if due >= now {
        return Ok(on_time);
    }

    let Some(period) = period else {
        return Ok(Realigned { due: now, ..on_time });
    };

    let behind = nanos(now - due);
    let step = nanos(period);
    let missed = (behind + step - 1) / step;
    let offset = missed * step - behind;

    let overflow = || FluxError::overflow("timer schedule");
    let k = i64::try_from(missed).map_err(|_| overflow())?;
    let next_tick = ticks_fired.checked_add(k).ok_or_else(overflow)?;

    if offset == 0 {
        return Ok(Realigned {
            due: now,
            ticks_fired: next_tick,
            catch_up: None,
            skipped: k,
        });
    }

    let offset = i64::try_from(offset).map_err(|_| overflow())?;
    let next_due = now
        .checked_add_signed(TimeDelta::nanoseconds(offset))
        .ok_or_else(overflow)?;

    Ok(Realigned {
        due: next_due,
        ticks_fired: next_tick,
        catch_up: Some(next_tick - 1),
        skipped: k - 1,
    })
}

fn nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos())
}
