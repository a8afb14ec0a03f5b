// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Checkpointable operator state.
//!
//! Operators declare named slots in an [`OperatorState`] container. The container is
//! tagged with the operator kind and a state version and encodes into an opaque
//! [`StateBlob`]. Saving and loading are driven from outside through [`save`] and
//! [`load`]; an operator never checkpoints itself.
//!
//! # Example
//!
//! ```
//! use stateflux_core::state::{OperatorState, StateBlob};
//!
//! let mut state = OperatorState::new("example/counter", 1);
//! state.write("count", &42_i64).unwrap();
//!
//! let blob: StateBlob = state.to_blob().unwrap();
//! let restored = OperatorState::from_blob(&blob).unwrap();
//! assert_eq!(restored.read::<i64>("count").unwrap(), 42);
//! ```

use crate::error::{Result, StateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque, operator-specific checkpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlob(Vec<u8>);

impl StateBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for StateBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Named, versioned state slots of one operator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorState {
    kind: String,
    version: u32,
    slots: BTreeMap<String, Vec<u8>>,
}

impl OperatorState {
    pub fn new(kind: impl Into<String>, version: u32) -> Self {
        Self {
            kind: kind.into(),
            version,
            slots: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Store `value` under `slot`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a `StateError::Encoding` if the value cannot be encoded.
    pub fn write<V>(&mut self, slot: &str, value: &V) -> Result<()>
    where
        V: Serialize + ?Sized,
    {
        let bytes = bincode::serialize(value).map_err(StateError::from)?;
        self.slots.insert(slot.to_owned(), bytes);
        Ok(())
    }

    /// Read the value stored under `slot`.
    ///
    /// # Errors
    /// Returns `StateError::MissingSlot` if the slot was never written and
    /// `StateError::Encoding` if it does not decode as `V`.
    pub fn read<V>(&self, slot: &str) -> Result<V>
    where
        V: DeserializeOwned,
    {
        let bytes = self
            .slots
            .get(slot)
            .ok_or_else(|| StateError::MissingSlot(slot.to_owned()))?;
        Ok(bincode::deserialize(bytes).map_err(StateError::from)?)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// # Errors
    /// Returns a `StateError::Encoding` if the container cannot be encoded.
    pub fn to_blob(&self) -> Result<StateBlob> {
        Ok(StateBlob(bincode::serialize(self).map_err(StateError::from)?))
    }

    /// # Errors
    /// Returns a `StateError::Encoding` if the blob is not an encoded container.
    pub fn from_blob(blob: &StateBlob) -> Result<Self> {
        Ok(bincode::deserialize(blob.as_bytes()).map_err(StateError::from)?)
    }
}

/// An operator instance whose state can be captured and replaced.
///
/// `save_state` and `load_state` are only called while the instance is quiescent (no
/// notification in flight); implementations do not synchronize against delivery beyond
/// what their own state lock already provides. After `load_state` returns, the instance
/// must behave exactly like the instance the state was saved from.
pub trait StatefulOperator: Send + Sync {
    /// Stable identifier of the operator type, recorded in every blob.
    fn kind(&self) -> &'static str;

    /// Highest state version this implementation writes and reads.
    fn version(&self) -> u32 {
        1
    }

    /// Write every slot of the current state into `state`.
    ///
    /// # Errors
    /// Returns an error if a slot cannot be encoded.
    fn save_state(&self, state: &mut OperatorState) -> Result<()>;

    /// Replace the current state wholesale with the slots of `state`.
    ///
    /// # Errors
    /// Returns an error if a slot is missing, malformed, or inconsistent with the
    /// instance's construction parameters.
    fn load_state(&self, state: &OperatorState) -> Result<()>;
}

/// Capture the state of one operator instance.
///
/// # Errors
/// Returns an error if the operator fails to encode a slot.
pub fn save(operator: &dyn StatefulOperator) -> Result<StateBlob> {
    let mut state = OperatorState::new(operator.kind(), operator.version());
    operator.save_state(&mut state)?;
    state.to_blob()
}

/// Load a blob produced by [`save`] into an operator instance.
///
/// # Errors
/// Returns `StateError::KindMismatch` if the blob belongs to another operator type,
/// `StateError::UnsupportedVersion` if it was written by a newer version, or any error
/// raised by the operator while loading its slots.
pub fn load(operator: &dyn StatefulOperator, blob: &StateBlob) -> Result<()> {
    let state = OperatorState::from_blob(blob)?;

    if state.kind() != operator.kind() {
        return Err(StateError::KindMismatch {
            expected: operator.kind().to_owned(),
            found: state.kind().to_owned(),
        }
        .into());
    }

    if state.version() > operator.version() {
        return Err(StateError::UnsupportedVersion {
            kind: state.kind().to_owned(),
            found: state.version(),
            supported: operator.version(),
        }
        .into());
    }

    operator.load_state(&state)
}
