// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Disposable subscription handles.
//!
//! A [`Subscription`] is a cheap, cloneable handle to shared disposal state. Disposal is
//! idempotent, runs the optional teardown exactly once and disposes every child. A
//! subscription may also carry the [`StatefulOperator`] instance it represents, which is
//! how the checkpoint coordinator finds every operator of a live graph.
//!
//! Dropping a handle does not dispose it.

use crate::state::StatefulOperator;
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

type Teardown = Box<dyn FnOnce() + Send>;

/// Idempotently disposable handle owning child subscriptions and teardown logic.
///
/// # Example
///
/// ```
/// use stateflux_core::Subscription;
///
/// let parent = Subscription::new();
/// let child = Subscription::new();
/// parent.add(child.clone());
///
/// parent.dispose();
/// parent.dispose();
/// assert!(child.is_disposed());
/// ```
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

struct Inner {
    disposed: AtomicBool,
    event: Event,
    teardown: Mutex<Option<Teardown>>,
    children: Mutex<Vec<Subscription>>,
    operator: Option<Arc<dyn StatefulOperator>>,
}

impl Subscription {
    /// Create an active subscription with nothing attached.
    pub fn new() -> Self {
        Self::build(None, None)
    }

    /// Create a subscription that runs `teardown` on disposal.
    pub fn from_fn<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::build(Some(Box::new(teardown)), None)
    }

    /// Create the downstream-facing subscription of a stateful operator instance.
    ///
    /// `upstream` is the composite holding everything the instance owns; it is disposed
    /// together with the returned handle.
    pub fn for_operator(operator: Arc<dyn StatefulOperator>, upstream: Subscription) -> Self {
        let subscription = Self::build(None, Some(operator));
        subscription.add(upstream);
        subscription
    }

    fn build(teardown: Option<Teardown>, operator: Option<Arc<dyn StatefulOperator>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                event: Event::new(),
                teardown: Mutex::new(teardown),
                children: Mutex::new(Vec::new()),
                operator,
            }),
        }
    }

    /// Attach a child that is disposed together with this subscription.
    ///
    /// A child added after disposal is disposed immediately.
    pub fn add(&self, child: Subscription) {
        if self.is_disposed() {
            child.dispose();
            return;
        }

        self.inner.children.lock().push(child.clone());

        // dispose() may have run between the check and the push
        if self.is_disposed() {
            child.dispose();
        }
    }

    /// Dispose this subscription and all of its children.
    ///
    /// Calling it multiple times has the same effect as calling it once.
    pub fn dispose(&self) {
        self.try_dispose();
    }

    /// Dispose, returning `true` only for the call that actually performed the disposal.
    pub fn try_dispose(&self) -> bool {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return false;
        }

        let teardown = self.inner.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }

        // Children stay attached so the graph can still be walked after disposal
        let children = self.inner.children.lock().clone();
        for child in children {
            child.dispose();
        }

        self.inner.event.notify(usize::MAX);
        true
    }

    /// Check if the subscription has been disposed (non-blocking).
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the subscription is disposed.
    ///
    /// If it is already disposed, this returns immediately.
    pub fn disposed(&self) -> Disposed<'_> {
        Disposed {
            subscription: self,
            listener: None,
        }
    }

    /// Stateful operator represented by this handle, if any.
    pub fn operator(&self) -> Option<&Arc<dyn StatefulOperator>> {
        self.inner.operator.as_ref()
    }

    /// Walk the subscription tree depth-first, operator before children, children in
    /// insertion order.
    pub fn visit_operators(&self, visitor: &mut dyn FnMut(&Arc<dyn StatefulOperator>)) {
        if let Some(operator) = &self.inner.operator {
            visitor(operator);
        }
        let children = self.inner.children.lock().clone();
        for child in &children {
            child.visit_operators(visitor);
        }
    }

    /// Every stateful operator of the graph rooted here, in visiting order.
    pub fn operators(&self) -> Vec<Arc<dyn StatefulOperator>> {
        let mut operators = Vec::new();
        self.visit_operators(&mut |op| operators.push(Arc::clone(op)));
        operators
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .field("children", &self.inner.children.lock().len())
            .field("operator", &self.inner.operator.as_ref().map(|op| op.kind()))
            .finish()
    }
}

/// Future returned by [`Subscription::disposed()`].
pub struct Disposed<'a> {
    subscription: &'a Subscription,
    listener: Option<EventListener>,
}

impl Future for Disposed<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.subscription.is_disposed() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                None => {
                    // Re-checked at the top of the loop after registering
                    self.listener = Some(self.subscription.inner.event.listen());
                }
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
