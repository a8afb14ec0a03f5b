// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::nullability::{NonNullable, Nullability};
use super::numeric::Numeric;
use super::Aggregation;
use stateflux_core::{OperatorState, Result};
use std::marker::PhantomData;

/// Smallest element. NaN counts as smaller than every number.
pub struct Min<N, K = NonNullable>(PhantomData<fn() -> (N, K)>);

/// Largest element. NaN counts as smaller than every number.
pub struct Max<N, K = NonNullable>(PhantomData<fn() -> (N, K)>);

fn track<N, K>(best: &mut Option<N>, element: K::Value<N>, replaces: fn(N, N) -> bool)
where
    N: Numeric,
    K: Nullability,
{
    if let Some(candidate) = K::into_option::<N>(element) {
        match best {
            Some(current) if !replaces(candidate, *current) => {}
            _ => *best = Some(candidate),
        }
    }
}

fn finish<N, K>(best: Option<N>) -> Result<K::Value<N>>
where
    N: Numeric,
    K: Nullability,
{
    match best {
        Some(value) => Ok(K::present::<N>(value)),
        None => K::absent::<N>(),
    }
}

impl<N: Numeric, K: Nullability> Aggregation for Min<N, K> {
    type Element = K::Value<N>;
    type Accumulator = Option<N>;
    type Output = K::Value<N>;

    const KIND: &'static str = "stateflux/min";

    fn initial() -> Option<N> {
        None
    }

    fn accumulate(best: &mut Option<N>, element: Self::Element) -> Result<()> {
        track::<N, K>(best, element, |candidate, current| {
            candidate < current || candidate.is_nan()
        });
        Ok(())
    }

    fn finish(best: &Option<N>) -> Result<Self::Output> {
        finish::<N, K>(*best)
    }

    fn save_accumulator(best: &Option<N>, state: &mut OperatorState) -> Result<()> {
        state.write("best", best)
    }

    fn load_accumulator(state: &OperatorState) -> Result<Option<N>> {
        state.read("best")
    }
}

impl<N: Numeric, K: Nullability> Aggregation for Max<N, K> {
    type Element = K::Value<N>;
    type Accumulator = Option<N>;
    type Output = K::Value<N>;

    const KIND: &'static str = "stateflux/max";

    fn initial() -> Option<N> {
        None
    }

    fn accumulate(best: &mut Option<N>, element: Self::Element) -> Result<()> {
        track::<N, K>(best, element, |candidate, current| {
            candidate > current || current.is_nan()
        });
        Ok(())
    }

    fn finish(best: &Option<N>) -> Result<Self::Output> {
        finish::<N, K>(*best)
    }

    fn save_accumulator(best: &Option<N>, state: &mut OperatorState) -> Result<()> {
        state.write("best", best)
    }

    fn load_accumulator(state: &OperatorState) -> Result<Option<N>> {
        state.read("best")
    }
}
