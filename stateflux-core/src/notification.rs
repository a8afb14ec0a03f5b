// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::FluxError;

/// One message of the observer protocol.
///
/// A sequence is zero or more `Next` messages optionally followed by exactly one
/// terminal message (`Error` or `Completed`). Nothing may follow a terminal message.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T> {
    /// A value
    Next(T),
    /// A fault that terminates the sequence
    Error(FluxError),
    /// Successful termination
    Completed,
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Completed`.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Next(_))
    }

    /// Returns the value of a `Next` notification.
    pub fn value(self) -> Option<T> {
        match self {
            Notification::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a reference to the fault of an `Error` notification.
    pub const fn error(&self) -> Option<&FluxError> {
        match self {
            Notification::Error(e) => Some(e),
            _ => None,
        }
    }
}
