// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::recorded::{Recorded, SubscriptionLog};
use crate::test_scheduler::TestScheduler;
use parking_lot::Mutex;
use stateflux_core::{BoxObserver, Observable, Observer, Subject, Subscription};
use std::sync::Arc;

/// Hot source emitting pre-recorded notifications at their virtual ticks.
///
/// Messages are queued on the scheduler at construction and broadcast to whoever is
/// subscribed when their tick is reached. Every subscription is logged with the ticks at
/// which it was opened and disposed.
pub struct HotObservable<T> {
    scheduler: TestScheduler,
    subject: Subject<T>,
    subscriptions: Arc<Mutex<Vec<SubscriptionLog>>>,
}

impl<T> HotObservable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(scheduler: TestScheduler, messages: Vec<Recorded<T>>) -> Self {
        let subject = Subject::new();

        for Recorded { time, value } in messages {
            let subject = subject.clone();
            // The source owns its schedule; the wake-ups are never cancelled
            let _ = scheduler.schedule_at_ticks(time, move || subject.notify(value));
        }

        Self {
            scheduler,
            subject,
            subscriptions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionLog> {
        self.subscriptions.lock().clone()
    }
}

impl<T> Clone for HotObservable<T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            subject: self.subject.clone(),
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}

impl<T> Observable<T> for HotObservable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        let index = {
            let mut log = self.subscriptions.lock();
            log.push(SubscriptionLog {
                subscribe: self.scheduler.now_ticks(),
                unsubscribe: None,
            });
            log.len() - 1
        };

        let inner = self.subject.subscribe(observer);
        let scheduler = self.scheduler.clone();
        let subscriptions = Arc::clone(&self.subscriptions);

        Subscription::from_fn(move || {
            inner.dispose();
            if let Some(entry) = subscriptions.lock().get_mut(index) {
                entry.unsubscribe = Some(scheduler.now_ticks());
            }
        })
    }
}
