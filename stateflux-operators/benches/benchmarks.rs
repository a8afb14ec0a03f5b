// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod aggregate_bench;
mod combine_latest_bench;

use aggregate_bench::bench_aggregate;
use combine_latest_bench::bench_combine_latest;
use criterion::{criterion_group, criterion_main};

criterion_group!(benches, bench_combine_latest, bench_aggregate);
criterion_main!(benches);
