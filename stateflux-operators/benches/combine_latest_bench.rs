// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use stateflux_core::{boxed, observer_fn, BoxObservable, Observable, Observer, Subject};
use stateflux_operators::combine_latest;
use std::hint::black_box;

pub fn bench_combine_latest(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine_latest");
    let sizes = [100usize, 1000usize, 10000];
    let arities = [2usize, 4usize, 16usize];

    for &size in &sizes {
        for &arity in &arities {
            let id = BenchmarkId::from_parameter(format!("m{size}_n{arity}"));
            group.throughput(Throughput::Elements(size as u64));

            group.bench_with_input(id, &(size, arity), |bencher, &(size, arity)| {
                // Setup: subscribe a fresh graph (not timed)
                let setup = || {
                    let subjects: Vec<Subject<u64>> = (0..arity).map(|_| Subject::new()).collect();
                    let sources: Vec<BoxObservable<u64>> =
                        subjects.iter().map(|s| boxed(s.clone())).collect();
                    let combined = combine_latest(sources, |values: &[u64]| {
                        Ok(values.iter().sum::<u64>())
                    })
                    .expect("arity within range");
                    let subscription = combined.subscribe(observer_fn(|n| {
                        black_box(n);
                    }));
                    (subjects, subscription)
                };

                bencher.iter_with_setup(setup, |(subjects, subscription)| {
                    for i in 0..size {
                        subjects[i % arity].on_next(i as u64);
                    }
                    subscription.dispose();
                });
            });
        }
    }

    group.finish();
}
