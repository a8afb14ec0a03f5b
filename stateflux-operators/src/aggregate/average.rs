// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::nullability::{NonNullable, Nullability};
use super::numeric::Numeric;
use super::Aggregation;
use stateflux_core::{warn, FluxError, OperatorState, Result};
use std::marker::PhantomData;

/// Arithmetic mean.
///
/// Integral elements are summed in `i64` and floating elements in `f64`, both with a
/// 64-bit element counter. Overflowing either the sum or the counter is an `Overflow`
/// fault.
pub struct Average<N, K = NonNullable>(PhantomData<fn() -> (N, K)>);

pub struct Mean<W> {
    sum: W,
    count: i64,
}

impl<N: Numeric, K: Nullability> Aggregation for Average<N, K> {
    type Element = K::Value<N>;
    type Accumulator = Mean<N::Wide>;
    type Output = K::Value<N::Mean>;

    const KIND: &'static str = "stateflux/average";

    fn initial() -> Self::Accumulator {
        Mean {
            sum: N::WIDE_ZERO,
            count: 0,
        }
    }

    fn accumulate(acc: &mut Self::Accumulator, element: Self::Element) -> Result<()> {
        let Some(value) = K::into_option::<N>(element) else {
            return Ok(());
        };

        acc.count = acc.count.checked_add(1).ok_or_else(|| {
            warn!("average: element counter overflow");
            FluxError::overflow("average count")
        })?;
        acc.sum = N::checked_add_wide(acc.sum, value.widen()).ok_or_else(|| {
            warn!("average: sum overflow adding {:?}", value);
            FluxError::overflow("average sum")
        })?;
        Ok(())
    }

    fn finish(acc: &Self::Accumulator) -> Result<Self::Output> {
        if acc.count == 0 {
            return K::absent::<N::Mean>();
        }
        Ok(K::present::<N::Mean>(N::mean(acc.sum, acc.count)))
    }

    fn save_accumulator(acc: &Self::Accumulator, state: &mut OperatorState) -> Result<()> {
        state.write("sum", &acc.sum)?;
        state.write("count", &acc.count)
    }

    fn load_accumulator(state: &OperatorState) -> Result<Self::Accumulator> {
        Ok(Mean {
            sum: state.read("sum")?,
            count: state.read("count")?,
        })
    }
}
