// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from the push protocol to `futures::Stream`.

use crate::error::FluxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::stream_item::StreamItem;
use crate::subscription::Subscription;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

struct ChannelObserver<T> {
    tx: Mutex<Option<UnboundedSender<StreamItem<T>>>>,
}

impl<T: Send> Observer<T> for ChannelObserver<T> {
    fn on_next(&self, value: T) {
        if let Some(tx) = self.tx.lock().as_ref() {
            let _ = tx.unbounded_send(StreamItem::Value(value));
        }
    }

    fn on_error(&self, error: FluxError) {
        if let Some(tx) = self.tx.lock().take() {
            let _ = tx.unbounded_send(StreamItem::Error(error));
        }
    }

    fn on_completed(&self) {
        self.tx.lock().take();
    }
}

/// Stream of the notifications of one subscription.
///
/// Values and the terminal fault arrive as [`StreamItem`]s; completion ends the stream.
/// Dropping the stream disposes the subscription.
pub struct ObservableStream<T> {
    rx: UnboundedReceiver<StreamItem<T>>,
    subscription: Subscription,
}

impl<T> ObservableStream<T> {
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for ObservableStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl<T> Drop for ObservableStream<T> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}

/// Subscribe to `observable` and consume it as an async stream.
///
/// ```
/// use futures::StreamExt;
/// use stateflux_core::{from_iter, to_stream, StreamItem};
///
/// # futures::executor::block_on(async {
/// let items: Vec<_> = to_stream(from_iter(vec![1, 2])).collect().await;
/// assert_eq!(items, vec![StreamItem::Value(1), StreamItem::Value(2)]);
/// # });
/// ```
pub fn to_stream<T, O>(observable: O) -> ObservableStream<T>
where
    T: Send + 'static,
    O: Observable<T>,
{
    let (tx, rx) = mpsc::unbounded();
    let observer = Arc::new(ChannelObserver {
        tx: Mutex::new(Some(tx)),
    });
    let subscription = observable.subscribe(observer);
    ObservableStream { rx, subscription }
}
