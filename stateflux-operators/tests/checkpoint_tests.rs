// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use stateflux_core::{
    boxed, save, BoxObservable, Checkpoint, FluxError, Observable, StateError, Subject,
};
use stateflux_operators::{combine_latest, Average, Max, Min, Nullable, ObservableExt, Sum};
use stateflux_test_utils::{
    on_completed, on_next, run_to_end, run_with_restore, HotObservable, Recorded, TestObserver,
    TestScheduler,
};

fn latched_scenario(scheduler: &TestScheduler) -> (HotObservable<i32>, HotObservable<i32>) {
    let a = scheduler.create_hot_observable(vec![
        on_next(210, 2),
        on_next(225, 4),
        on_completed(260),
    ]);
    let b = scheduler.create_hot_observable(vec![
        on_next(220, 3),
        on_next(230, 5),
        on_next(235, 6),
        on_next(240, 7),
        on_completed(250),
    ]);
    (a, b)
}

fn combine_graph(a: &HotObservable<i32>, b: &HotObservable<i32>) -> BoxObservable<i32> {
    let sources = vec![boxed(a.clone()), boxed(b.clone())];
    combine_latest(sources, |values: &[i32]| Ok(values[0] * 10 + values[1]))
        .expect("two sources are a valid arity")
}

fn baseline<R, F>(scenario: F, until: i64) -> Vec<Recorded<R>>
where
    R: Clone + Send + 'static,
    F: Fn(&TestScheduler) -> BoxObservable<R>,
{
    let scheduler = TestScheduler::new();
    let graph = scenario(&scheduler);
    run_to_end(&scheduler, &graph, until)
}

fn restored<R, F>(scenario: F, checkpoint_at: i64, until: i64) -> anyhow::Result<Vec<Recorded<R>>>
where
    R: Clone + Send + 'static,
    F: Fn(&TestScheduler) -> BoxObservable<R>,
{
    let scheduler = TestScheduler::new();
    let graph = scenario(&scheduler);
    Ok(run_with_restore(&scheduler, || graph.clone(), checkpoint_at, until)?)
}

#[test]
fn test_combine_latest_checkpoint_is_transparent() -> anyhow::Result<()> {
    // Arrange
    let scenario = |scheduler: &TestScheduler| {
        let (a, b) = latched_scenario(scheduler);
        combine_graph(&a, &b)
    };
    let expected = baseline(scenario, 1000);

    // Act & Assert
    for checkpoint_at in [205, 215, 222, 227, 237, 245] {
        assert_eq!(restored(scenario, checkpoint_at, 1000)?, expected, "split at {checkpoint_at}");
    }
    assert_eq!(expected.last(), Some(&on_completed(260)));

    Ok(())
}

#[test]
fn test_combine_latest_checkpoint_preserves_barren_input() -> anyhow::Result<()> {
    // Arrange
    let scenario = |scheduler: &TestScheduler| {
        let a = scheduler.create_hot_observable(vec![on_completed(250)]);
        let b = scheduler.create_hot_observable(vec![on_next(500, 1), on_completed(800)]);
        combine_graph(&a, &b)
    };
    let expected = baseline(scenario, 1000);

    // Act
    let actual = restored(scenario, 300, 1000)?;

    // Assert
    assert_eq!(expected, vec![on_completed(500)]);
    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn test_terminated_combine_latest_stays_silent_after_restore() -> anyhow::Result<()> {
    // Arrange
    let scenario = |scheduler: &TestScheduler| {
        let a = scheduler.create_hot_observable(vec![on_completed(250)]);
        let b = scheduler.create_hot_observable(vec![on_next(500, 1), on_next(700, 2)]);
        combine_graph(&a, &b)
    };

    // Act
    let actual = restored(scenario, 600, 1000)?;

    // Assert
    assert_eq!(actual, vec![on_completed(500)]);

    Ok(())
}

#[test]
fn test_aggregates_checkpoint_is_transparent() -> anyhow::Result<()> {
    // Arrange
    fn source(scheduler: &TestScheduler) -> HotObservable<Option<i64>> {
        scheduler.create_hot_observable(vec![
            on_next(210, Some(4)),
            on_next(220, None),
            on_next(230, Some(-7)),
            on_next(240, Some(12)),
            on_completed(300),
        ])
    }
    let sum = |s: &TestScheduler| boxed(source(s).aggregate::<Sum<i64, Nullable>>());
    let min = |s: &TestScheduler| boxed(source(s).aggregate::<Min<i64, Nullable>>());
    let max = |s: &TestScheduler| boxed(source(s).aggregate::<Max<i64, Nullable>>());
    let average = |s: &TestScheduler| boxed(source(s).aggregate::<Average<i64, Nullable>>());

    // Act & Assert
    for checkpoint_at in [205, 215, 225, 235, 250] {
        assert_eq!(restored(sum, checkpoint_at, 1000)?, baseline(sum, 1000));
        assert_eq!(restored(min, checkpoint_at, 1000)?, baseline(min, 1000));
        assert_eq!(restored(max, checkpoint_at, 1000)?, baseline(max, 1000));
        assert_eq!(restored(average, checkpoint_at, 1000)?, baseline(average, 1000));
    }
    assert_eq!(baseline(sum, 1000), vec![on_next(300, Some(9)), on_completed(300)]);
    assert_eq!(baseline(average, 1000), vec![on_next(300, Some(3.0)), on_completed(300)]);

    Ok(())
}

#[test]
fn test_nan_survives_checkpoint() -> anyhow::Result<()> {
    // Arrange
    let scenario = |s: &TestScheduler| {
        let source = s.create_hot_observable(vec![
            on_next(210, 3.0_f64),
            on_next(220, f64::NAN),
            on_next(230, 1.0_f64),
            on_completed(300),
        ]);
        boxed(source.aggregate::<Min<f64>>())
    };

    // Act
    let actual = restored(scenario, 225, 1000)?;

    // Assert
    assert_eq!(actual.len(), 2);
    assert!(matches!(actual[0].value.clone().value(), Some(v) if v.is_nan()));

    Ok(())
}

#[test]
fn test_nested_graph_is_captured_depth_first() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let a = Subject::<i64>::new();
    let b = Subject::<i64>::new();
    let total = boxed(a.clone().aggregate::<Sum<i64>>());
    let largest = boxed(b.clone().aggregate::<Max<i64>>());
    let graph = combine_latest(vec![total, largest], |values: &[i64]| Ok(values.to_vec()))?;
    let observer = TestObserver::new(&scheduler);

    // Act
    let subscription = graph.subscribe(observer.boxed());
    let kinds: Vec<_> = subscription.operators().iter().map(|op| op.kind()).collect();

    // Assert
    assert_eq!(kinds, vec!["stateflux/combine_latest", "stateflux/sum", "stateflux/max"]);
    assert_eq!(Checkpoint::capture(&subscription)?.len(), 3);

    Ok(())
}

#[test]
fn test_restore_rejects_foreign_state() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = Subject::<i32>::new();
    let observer = TestObserver::new(&scheduler);
    let sum = source.clone().aggregate::<Sum<i32>>().subscribe(observer.boxed());
    let min = source.aggregate::<Min<i32>>().subscribe(TestObserver::new(&scheduler).boxed());
    let blob = save(sum.operators()[0].as_ref())?;

    // Act
    let result = stateflux_core::load(min.operators()[0].as_ref(), &blob);

    // Assert
    assert!(matches!(
        result,
        Err(FluxError::State(StateError::KindMismatch { .. }))
    ));

    Ok(())
}

#[test]
fn test_restore_rejects_graph_of_different_shape() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let (a, b) = latched_scenario(&scheduler);
    let first = combine_graph(&a, &b).subscribe(TestObserver::new(&scheduler).boxed());
    let checkpoint = Checkpoint::capture(&first)?;
    let other = a.aggregate::<Sum<i32>>();
    let second = combine_latest(
        vec![boxed(other), boxed(b)],
        |values: &[i32]| Ok(values[0] + values[1]),
    )?
    .subscribe(TestObserver::new(&scheduler).boxed());

    // Act
    let result = checkpoint.restore(&second);

    // Assert
    assert!(matches!(
        result,
        Err(FluxError::State(StateError::GraphMismatch { expected: 1, found: 2 }))
    ));

    Ok(())
}
