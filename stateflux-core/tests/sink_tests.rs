// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use stateflux_core::{observer_fn, FluxError, Notification, Sink, Subscription};
use std::sync::Arc;

fn recording_sink() -> (Arc<Mutex<Vec<Notification<i32>>>>, Sink<i32>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let out = Arc::clone(&log);
    (log, Sink::new(observer_fn(move |n| out.lock().push(n))))
}

#[test]
fn test_sink_delivers_at_most_one_terminal() {
    // Arrange
    let (log, sink) = recording_sink();

    // Act
    sink.forward_next(1);
    sink.forward_completed();
    sink.forward_error(FluxError::stream_error("late"));
    sink.forward_next(2);

    // Assert
    assert_eq!(*log.lock(), vec![Notification::Next(1), Notification::Completed]);
    assert!(sink.is_stopped());
}

#[test]
fn test_terminal_disposes_upstream_resources() {
    // Arrange
    let (_log, sink) = recording_sink();
    let input = Subscription::new();
    sink.upstream().add(input.clone());

    // Act
    sink.forward_error(FluxError::stream_error("boom"));

    // Assert
    assert!(input.is_disposed());
}

#[test]
fn test_stop_is_silent() {
    // Arrange
    let (log, sink) = recording_sink();

    // Act
    sink.stop();
    sink.forward_next(1);
    sink.forward_completed();

    // Assert
    assert!(log.lock().is_empty());
    assert!(sink.is_stopped());
}
