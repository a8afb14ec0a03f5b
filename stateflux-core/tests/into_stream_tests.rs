// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use stateflux_core::{
    empty, from_iter, never, throw, to_stream, FluxError, Observer, StreamItem, Subject,
};

#[tokio::test]
async fn test_cold_source_streams_values_then_ends() {
    // Arrange
    let source = from_iter(vec![1, 2, 3]);

    // Act
    let items: Vec<_> = to_stream(source).collect().await;

    // Assert
    assert_eq!(
        items,
        vec![StreamItem::Value(1), StreamItem::Value(2), StreamItem::Value(3)]
    );
}

#[tokio::test]
async fn test_error_is_the_last_item() {
    // Arrange
    let source = throw::<i32>(FluxError::stream_error("offline"));

    // Act
    let items: Vec<_> = to_stream(source).collect().await;

    // Assert
    assert_eq!(items, vec![StreamItem::Error(FluxError::stream_error("offline"))]);
}

#[tokio::test]
async fn test_empty_source_ends_immediately() {
    // Arrange & Act
    let items: Vec<StreamItem<i32>> = to_stream(empty()).collect().await;

    // Assert
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_hot_source_is_pulled_as_pushed() {
    // Arrange
    let subject = Subject::<&'static str>::new();
    let mut stream = to_stream(subject.clone());

    // Act
    subject.on_next("a");
    let first = stream.next().await;
    subject.on_next("b");
    subject.on_completed();
    let rest: Vec<_> = stream.collect().await;

    // Assert
    assert_eq!(first, Some(StreamItem::Value("a")));
    assert_eq!(rest, vec![StreamItem::Value("b")]);
}

#[tokio::test]
async fn test_dropping_stream_disposes_subscription() {
    // Arrange
    let subject = Subject::<i32>::new();
    let stream = to_stream(never::<i32>());
    let hot = to_stream(subject.clone());
    let subscription = stream.subscription().clone();

    // Act
    drop(stream);
    drop(hot);

    // Assert
    assert!(subscription.is_disposed());
    assert_eq!(subject.observer_count(), 0);
}
