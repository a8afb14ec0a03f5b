// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use stateflux_core::{observer_fn, Observable, Observer, Subject};
use stateflux_operators::{Average, ObservableExt};
use std::hint::black_box;

pub fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("average");
    let sizes = [1000usize, 100000usize];

    for &size in &sizes {
        let id = BenchmarkId::from_parameter(format!("m{size}"));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(id, &size, |bencher, &size| {
            let setup = || {
                let subject = Subject::<i64>::new();
                let subscription = subject
                    .clone()
                    .aggregate::<Average<i64>>()
                    .subscribe(observer_fn(|n| {
                        black_box(n);
                    }));
                (subject, subscription)
            };

            bencher.iter_with_setup(setup, |(subject, subscription)| {
                for i in 0..size {
                    subject.on_next(i as i64);
                }
                subject.on_completed();
                subscription.dispose();
            });
        });
    }

    group.finish();
}
