// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod impls;
pub mod scheduler;

pub use scheduler::{Action, Scheduler};

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioScheduler;
