// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{TimeDelta, Utc};
use stateflux_runtime::{Scheduler, TokioScheduler};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn flag() -> (Arc<AtomicBool>, Arc<AtomicBool>) {
    let flag = Arc::new(AtomicBool::new(false));
    (Arc::clone(&flag), flag)
}

#[tokio::test]
async fn test_action_runs_at_due_instant() {
    // Arrange
    let scheduler = TokioScheduler;
    let (ran, setter) = flag();
    let due = scheduler.now() + TimeDelta::milliseconds(10);

    // Act
    let subscription =
        scheduler.schedule_at(due, Box::new(move || setter.store(true, Ordering::SeqCst)));
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert
    assert!(ran.load(Ordering::SeqCst));
    assert!(Utc::now() >= due);
    assert!(subscription.is_disposed());
}

#[tokio::test]
async fn test_past_due_runs_immediately() {
    // Arrange
    let scheduler = TokioScheduler;
    let (ran, setter) = flag();

    // Act
    let _subscription = scheduler.schedule_at(
        scheduler.now() - TimeDelta::seconds(5),
        Box::new(move || setter.store(true, Ordering::SeqCst)),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert!(ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_disposed_action_never_runs() {
    // Arrange
    let scheduler = TokioScheduler;
    let (ran, setter) = flag();
    let subscription = scheduler.schedule_at(
        scheduler.now() + TimeDelta::milliseconds(20),
        Box::new(move || setter.store(true, Ordering::SeqCst)),
    );

    // Act
    subscription.dispose();
    tokio::time::sleep(Duration::from_millis(60)).await;

    // Assert
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_schedule_after_negative_delay_runs_immediately() {
    // Arrange
    let scheduler = TokioScheduler;
    let (ran, setter) = flag();

    // Act
    let subscription = scheduler.schedule_after(
        TimeDelta::seconds(-5),
        Box::new(move || setter.store(true, Ordering::SeqCst)),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert!(ran.load(Ordering::SeqCst));
    assert!(subscription.is_disposed());
}
