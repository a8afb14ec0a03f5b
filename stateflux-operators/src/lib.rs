// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Checkpointable multi-input and reducing operators.
//!
//! - [`CombineLatest`] latches the latest value of 2 to 16 inputs and recombines them on
//!   every change.
//! - [`Aggregate`] runs one of the reducers [`Sum`], [`Average`], [`Min`] or [`Max`]
//!   over a numeric sequence, for plain ([`NonNullable`]) or optional ([`Nullable`])
//!   elements.
//!
//! Every subscription of these operators is a
//! [`StatefulOperator`](stateflux_core::StatefulOperator) instance reachable from the
//! returned subscription, so whole graphs can be captured and restored with
//! [`Checkpoint`](stateflux_core::Checkpoint).

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod aggregate;
pub mod combine_latest;
pub mod ext;

pub use aggregate::{
    Aggregate, Aggregation, Average, Max, Min, NonNullable, Nullability, Nullable, Numeric,
    Scalar, Sum,
};
pub use combine_latest::{combine_latest, CombineLatest};
pub use ext::ObservableExt;
