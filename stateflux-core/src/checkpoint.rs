// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Whole-graph checkpoint coordination.
//!
//! A [`Checkpoint`] holds one [`StateBlob`] per stateful operator of a subscribed graph, in
//! the order [`Subscription::operators`] visits them. Restoring requires a freshly
//! subscribed graph of the same shape and must happen before that graph observes its
//! first notification.

use crate::error::{Result, StateError};
use crate::state::{self, StateBlob};
use crate::subscription::Subscription;
use crate::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    operators: Vec<StateBlob>,
}

impl Checkpoint {
    /// Save every stateful operator reachable from `root`.
    ///
    /// # Errors
    /// Returns the first error raised while saving an operator.
    pub fn capture(root: &Subscription) -> Result<Self> {
        let operators = root
            .operators()
            .iter()
            .map(|op| state::save(op.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        debug!("captured checkpoint of {} operators", operators.len());
        Ok(Self { operators })
    }

    /// Load this checkpoint into the graph rooted at `root`.
    ///
    /// # Errors
    /// Returns `StateError::GraphMismatch` if the graph does not have exactly one
    /// stateful operator per saved state, or the first error raised while loading.
    pub fn restore(&self, root: &Subscription) -> Result<()> {
        let operators = root.operators();
        if operators.len() != self.operators.len() {
            warn!(
                "checkpoint shape mismatch: {} states for {} operators",
                self.operators.len(),
                operators.len()
            );
            return Err(StateError::GraphMismatch {
                expected: self.operators.len(),
                found: operators.len(),
            }
            .into());
        }

        for (operator, blob) in operators.iter().zip(&self.operators) {
            state::load(operator.as_ref(), blob)?;
        }

        debug!("restored checkpoint of {} operators", operators.len());
        Ok(())
    }

    pub fn blobs(&self) -> &[StateBlob] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// # Errors
    /// Returns a `StateError::Encoding` if the checkpoint cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self).map_err(StateError::from)?)
    }

    /// # Errors
    /// Returns a `StateError::Encoding` if `bytes` is not an encoded checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes).map_err(StateError::from)?)
    }
}
