// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::numeric::Scalar;
use stateflux_core::{FluxError, Result};

/// Whether elements and results of an aggregation may be absent.
///
/// For [`NonNullable`] the element and result types are the numeric type itself and an
/// aggregation over no elements is an `EmptySequence` fault. For [`Nullable`] they are
/// `Option`s: absent elements are skipped and an aggregation over no present elements
/// yields `None`.
pub trait Nullability: Send + Sync + 'static {
    type Value<V: Scalar>: Scalar;

    fn into_option<V: Scalar>(value: Self::Value<V>) -> Option<V>;

    fn present<V: Scalar>(value: V) -> Self::Value<V>;

    /// Result of an aggregation without any present element.
    ///
    /// # Errors
    /// `NonNullable` returns `FluxError::EmptySequence`.
    fn absent<V: Scalar>() -> Result<Self::Value<V>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonNullable;

#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable;

impl Nullability for NonNullable {
    type Value<V: Scalar> = V;

    fn into_option<V: Scalar>(value: V) -> Option<V> {
        Some(value)
    }

    fn present<V: Scalar>(value: V) -> V {
        value
    }

    fn absent<V: Scalar>() -> Result<V> {
        Err(FluxError::EmptySequence)
    }
}

impl Nullability for Nullable {
    type Value<V: Scalar> = Option<V>;

    fn into_option<V: Scalar>(value: Option<V>) -> Option<V> {
        value
    }

    fn present<V: Scalar>(value: V) -> Option<V> {
        Some(value)
    }

    fn absent<V: Scalar>() -> Result<Option<V>> {
        Ok(None)
    }
}
