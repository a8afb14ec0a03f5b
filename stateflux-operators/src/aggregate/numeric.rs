// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Plain value that can travel through a notification and be recorded in tests.
pub trait Scalar: Copy + Debug + PartialEq + Send + Sync + 'static {}

impl<V> Scalar for V where V: Copy + Debug + PartialEq + Send + Sync + 'static {}

/// Element type accepted by the aggregation operators.
///
/// Integral types add with overflow detection; floating types never overflow (they go to
/// infinity instead). `Wide` is the accumulator type used by [`Average`](super::Average)
/// and `Mean` the type of the resulting mean.
pub trait Numeric: Scalar + PartialOrd + Serialize + DeserializeOwned {
    const ZERO: Self;

    type Wide: Scalar + Serialize + DeserializeOwned;
    type Mean: Scalar;

    const WIDE_ZERO: Self::Wide;

    /// `None` on overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn widen(self) -> Self::Wide;

    /// `None` on overflow.
    fn checked_add_wide(acc: Self::Wide, value: Self::Wide) -> Option<Self::Wide>;

    /// Mean of `count` (> 0) elements adding up to `sum`.
    fn mean(sum: Self::Wide, count: i64) -> Self::Mean;

    fn is_nan(self) -> bool {
        false
    }
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const ZERO: Self = 0;

                type Wide = i64;
                type Mean = f64;

                const WIDE_ZERO: i64 = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn widen(self) -> i64 {
                    i64::from(self)
                }

                fn checked_add_wide(acc: i64, value: i64) -> Option<i64> {
                    acc.checked_add(value)
                }

                #[allow(clippy::cast_precision_loss)]
                fn mean(sum: i64, count: i64) -> f64 {
                    sum as f64 / count as f64
                }
            }
        )*
    };
}

impl_integral!(i32, i64);

impl Numeric for f32 {
    const ZERO: Self = 0.0;

    type Wide = f64;
    type Mean = f32;

    const WIDE_ZERO: f64 = 0.0;

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }

    fn checked_add_wide(acc: f64, value: f64) -> Option<f64> {
        Some(acc + value)
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn mean(sum: f64, count: i64) -> f32 {
        (sum / count as f64) as f32
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl Numeric for f64 {
    const ZERO: Self = 0.0;

    type Wide = f64;
    type Mean = f64;

    const WIDE_ZERO: f64 = 0.0;

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn widen(self) -> f64 {
        self
    }

    fn checked_add_wide(acc: f64, value: f64) -> Option<f64> {
        Some(acc + value)
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(sum: f64, count: i64) -> f64 {
        sum / count as f64
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}
