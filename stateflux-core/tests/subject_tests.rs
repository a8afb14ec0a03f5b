// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use stateflux_core::{
    observer_fn, BoxObserver, FluxError, Notification, Observable, Observer, Subject,
};
use std::sync::Arc;

type Log<T> = Arc<Mutex<Vec<Notification<T>>>>;

fn recorder<T: Send + 'static>() -> (Log<T>, BoxObserver<T>) {
    let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, observer_fn(move |n| sink.lock().push(n)))
}

#[test]
fn test_subject_broadcasts_to_current_subscribers() {
    // Arrange
    let subject = Subject::<i32>::new();
    let (first, first_observer) = recorder();
    let (second, second_observer) = recorder();
    let _a = subject.subscribe(first_observer);

    // Act
    subject.on_next(1);
    let _b = subject.subscribe(second_observer);
    subject.on_next(2);
    subject.on_completed();

    // Assert
    assert_eq!(
        *first.lock(),
        vec![Notification::Next(1), Notification::Next(2), Notification::Completed]
    );
    assert_eq!(*second.lock(), vec![Notification::Next(2), Notification::Completed]);
}

#[test]
fn test_subject_ignores_everything_after_termination() {
    // Arrange
    let subject = Subject::<i32>::new();
    let (log, observer) = recorder();
    let _subscription = subject.subscribe(observer);

    // Act
    subject.on_error(FluxError::stream_error("boom"));
    subject.on_next(1);
    subject.on_completed();

    // Assert
    assert!(subject.is_terminated());
    assert_eq!(subject.observer_count(), 0);
    assert_eq!(
        *log.lock(),
        vec![Notification::Error(FluxError::stream_error("boom"))]
    );
}

#[test]
fn test_late_subscriber_receives_terminal_notification() {
    // Arrange
    let subject = Subject::<i32>::new();
    subject.on_next(1);
    subject.on_completed();
    let (log, observer) = recorder();

    // Act
    let _subscription = subject.subscribe(observer);

    // Assert
    assert_eq!(*log.lock(), vec![Notification::Completed]);
}

#[test]
fn test_disposed_subscriber_is_removed() {
    // Arrange
    let subject = Subject::<i32>::new();
    let (log, observer) = recorder();
    let subscription = subject.subscribe(observer);

    // Act
    subscription.dispose();
    subject.on_next(5);

    // Assert
    assert_eq!(subject.observer_count(), 0);
    assert!(log.lock().is_empty());
}

#[test]
fn test_observer_may_dispose_itself_while_notified() {
    // Arrange
    let subject = Subject::<i32>::new();
    let slot: Arc<Mutex<Option<stateflux_core::Subscription>>> = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (own, log) = (Arc::clone(&slot), Arc::clone(&seen));
    let subscription = subject.subscribe(observer_fn(move |n: Notification<i32>| {
        log.lock().push(n);
        if let Some(me) = own.lock().take() {
            me.dispose();
        }
    }));
    *slot.lock() = Some(subscription);

    // Act
    subject.on_next(1);
    subject.on_next(2);

    // Assert
    assert_eq!(*seen.lock(), vec![Notification::Next(1)]);
}
