// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::scheduler::{Action, Scheduler};
use chrono::{DateTime, Utc};
use stateflux_core::Subscription;
use std::time::Duration;

/// Scheduler backed by the ambient Tokio runtime and the system clock.
///
/// Each wake-up is a spawned task sleeping until the due instant, raced against
/// disposal of the returned subscription.
///
/// # Panics
///
/// `schedule_at` panics when called outside a Tokio runtime.
#[derive(Clone, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn schedule_at(&self, due: DateTime<Utc>, action: Action) -> Subscription {
        let subscription = Subscription::new();
        let cancel = subscription.clone();
        let delay = (due - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => {
                    if cancel.try_dispose() {
                        action();
                    }
                }
                () = cancel.disposed() => {}
            }
        });

        subscription
    }
}
