// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::nullability::{NonNullable, Nullability};
use super::numeric::Numeric;
use super::Aggregation;
use stateflux_core::{warn, FluxError, OperatorState, Result};
use std::marker::PhantomData;

/// Checked running sum. An empty sequence sums to zero, also when nullable.
pub struct Sum<N, K = NonNullable>(PhantomData<fn() -> (N, K)>);

impl<N: Numeric, K: Nullability> Aggregation for Sum<N, K> {
    type Element = K::Value<N>;
    type Accumulator = N;
    type Output = K::Value<N>;

    const KIND: &'static str = "stateflux/sum";

    fn initial() -> N {
        N::ZERO
    }

    fn accumulate(sum: &mut N, element: Self::Element) -> Result<()> {
        if let Some(value) = K::into_option::<N>(element) {
            let Some(next) = sum.checked_add(value) else {
                warn!("sum: overflow adding {:?} to {:?}", value, sum);
                return Err(FluxError::overflow("sum"));
            };
            *sum = next;
        }
        Ok(())
    }

    fn finish(sum: &N) -> Result<Self::Output> {
        Ok(K::present::<N>(*sum))
    }

    fn save_accumulator(sum: &N, state: &mut OperatorState) -> Result<()> {
        state.write("sum", sum)
    }

    fn load_accumulator(state: &OperatorState) -> Result<N> {
        state.read("sum")
    }
}
