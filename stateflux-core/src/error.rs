// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the stateflux operator engine
//!
//! Every fault that can terminate a notification sequence, and every failure of the
//! checkpoint machinery, is a variant of the root [`FluxError`] type.
//!
//! # Examples
//!
//! ```
//! use stateflux_core::{FluxError, Result};
//!
//! fn validate(arity: usize) -> Result<()> {
//!     if arity < 2 {
//!         return Err(FluxError::invalid_argument("at least two sources are required"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate(1).is_err());
//! ```

use std::sync::Arc;

/// Root error type for all stateflux operations
///
/// Faults carried by `Error` notifications and errors returned synchronously from
/// construction or checkpoint calls share this type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FluxError {
    /// Generic fault raised by a source
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Fault raised by user code (selectors, combiners)
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A non-nullable aggregate completed without contributing elements
    #[error("Invalid operation: sequence contains no elements")]
    EmptySequence,

    /// Checked arithmetic exceeded the range of the accumulator
    #[error("Arithmetic operation resulted in an overflow: {context}")]
    Overflow {
        /// Which accumulator overflowed
        context: String,
    },

    /// A construction argument was rejected
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// Which argument was rejected and why
        context: String,
    },

    /// Saving or loading operator state failed
    #[error("Operator state error: {0}")]
    State(#[from] StateError),
}

/// Failures of the operator state container and the checkpoint coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// A slot the operator expects is absent from the loaded state
    #[error("missing state slot `{0}`")]
    MissingSlot(String),

    /// A slot or container could not be encoded or decoded
    #[error("state encoding failed: {0}")]
    Encoding(String),

    /// The blob was produced by a different operator kind
    #[error("state kind mismatch: expected `{expected}`, found `{found}`")]
    KindMismatch {
        /// Kind of the operator being loaded
        expected: String,
        /// Kind recorded in the blob
        found: String,
    },

    /// The blob was produced by a newer operator version
    #[error("unsupported state version {found} for `{kind}` (supports up to {supported})")]
    UnsupportedVersion {
        /// Operator kind
        kind: String,
        /// Version recorded in the blob
        found: u32,
        /// Highest version this build can read
        supported: u32,
    },

    /// A checkpoint does not fit the operator graph it is restored into
    #[error("checkpoint holds {expected} operator states but the graph has {found} operators")]
    GraphMismatch {
        /// Number of states in the checkpoint
        expected: usize,
        /// Number of stateful operators in the graph
        found: usize,
    },

    /// Loaded per-input state does not match the operator's arity
    #[error("state arity mismatch: expected {expected} inputs, found {found}")]
    ArityMismatch {
        /// Arity of the operator being loaded
        expected: usize,
        /// Arity recorded in the blob
        found: usize,
    },
}

impl FluxError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Create an overflow error naming the accumulator that overflowed
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }

    /// Create an argument validation error
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Returns `true` for the "sequence contains no elements" fault.
    #[must_use]
    pub const fn is_empty_sequence(&self) -> bool {
        matches!(self, Self::EmptySequence)
    }

    /// Returns `true` for checked arithmetic faults.
    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

impl PartialEq for FluxError {
    fn eq(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
            && self.to_string() == other.to_string()
    }
}

impl From<bincode::Error> for StateError {
    fn from(error: bincode::Error) -> Self {
        Self::Encoding(error.to_string())
    }
}

impl From<bincode::Error> for FluxError {
    fn from(error: bincode::Error) -> Self {
        Self::State(error.into())
    }
}

/// Specialized Result type for stateflux operations
pub type Result<T> = std::result::Result<T, FluxError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// User errors are folded into a `StreamProcessingError` carrying the context;
    /// every other variant is returned unchanged.
    ///
    /// # Errors
    /// Returns `Err(FluxError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FluxError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context = context.into();
            match e.into() {
                FluxError::UserError(inner) => FluxError::StreamProcessingError {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }
}
