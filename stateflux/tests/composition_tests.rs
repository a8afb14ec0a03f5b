// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::TimeDelta;
use stateflux::prelude::*;
use stateflux_test_utils::{
    on_completed, on_next, run_to_end, run_with_restore, HotObservable, Recorded, TestObserver,
    TestScheduler,
};

fn ticks(scheduler: &TestScheduler) -> Timer<TestScheduler> {
    Timer::periodic_at(scheduler.clone(), TestScheduler::time(100), TimeDelta::milliseconds(100))
        .expect("positive period")
}

fn readings(scheduler: &TestScheduler, messages: Vec<Recorded<i64>>) -> HotObservable<i64> {
    scheduler.create_hot_observable(messages)
}

/// Pair every tick with the total of all readings, once the readings are done.
fn tick_with_total(
    scheduler: &TestScheduler,
    readings: &HotObservable<i64>,
) -> BoxObservable<Vec<i64>> {
    let total = boxed(readings.clone().aggregate::<Sum<i64>>());
    boxed(
        ticks(scheduler)
            .combine_latest(vec![total], |values: &[i64]| Ok(values.to_vec()))
            .expect("two sources are a valid arity"),
    )
}

fn recorded_readings() -> Vec<Recorded<i64>> {
    vec![on_next(150, 10), on_next(250, 20), on_completed(260)]
}

#[test]
fn test_timer_combined_with_aggregate() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = readings(&scheduler, recorded_readings());
    let graph = tick_with_total(&scheduler, &source);

    // Act
    let messages = run_to_end(&scheduler, &graph, 450);

    // Assert
    assert_eq!(
        messages,
        vec![
            on_next(260, vec![1, 30]),
            on_next(300, vec![2, 30]),
            on_next(400, vec![3, 30]),
        ]
    );
}

#[test]
fn test_composed_graph_checkpoint_is_transparent() -> anyhow::Result<()> {
    // Arrange
    let baseline_scheduler = TestScheduler::new();
    let baseline_source = readings(&baseline_scheduler, recorded_readings());
    let expected = run_to_end(
        &baseline_scheduler,
        &tick_with_total(&baseline_scheduler, &baseline_source),
        450,
    );

    // Act & Assert
    for checkpoint_at in [120, 150, 255, 270, 350] {
        let scheduler = TestScheduler::new();
        let source = readings(&scheduler, recorded_readings());
        let actual = run_with_restore(
            &scheduler,
            || tick_with_total(&scheduler, &source),
            checkpoint_at,
            450,
        )?;
        assert_eq!(actual, expected, "split at {checkpoint_at}");
    }

    Ok(())
}

#[test]
fn test_composed_graph_resumes_after_downtime() -> anyhow::Result<()> {
    // Arrange
    let before = TestScheduler::new();
    let source = readings(&before, recorded_readings());
    let first = tick_with_total(&before, &source).subscribe(TestObserver::new(&before).boxed());
    before.advance_to(350);
    let bytes = Checkpoint::capture(&first)?.to_bytes()?;
    first.dispose();

    let after = TestScheduler::starting_at(730);
    let idle = readings(&after, vec![]);
    let observer = TestObserver::new(&after);
    let second = tick_with_total(&after, &idle).subscribe(observer.boxed());

    // Act
    Checkpoint::from_bytes(&bytes)?.restore(&second)?;
    after.advance_to(850);

    // Assert
    // the restored total is combined with the catch-up tick, then the grid resumes
    assert_eq!(
        observer.messages(),
        vec![on_next(730, vec![6, 30]), on_next(800, vec![7, 30])]
    );
    assert!(idle.subscriptions().iter().all(|log| log.unsubscribe.is_some()));

    Ok(())
}

#[test]
fn test_checkpoint_lists_operators_in_graph_order() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = readings(&scheduler, recorded_readings());
    let observer = TestObserver::new(&scheduler);

    // Act
    let subscription = tick_with_total(&scheduler, &source).subscribe(observer.boxed());
    let kinds: Vec<_> = subscription.operators().iter().map(|op| op.kind()).collect();

    // Assert
    assert_eq!(
        kinds,
        vec!["stateflux/combine_latest", "stateflux/timer", "stateflux/sum"]
    );

    Ok(())
}
