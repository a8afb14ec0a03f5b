// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod checkpoint;
pub mod error;
pub mod into_stream;
pub mod logging;
pub mod notification;
pub mod observable;
pub mod observer;
pub mod sink;
pub mod sources;
pub mod state;
pub mod stream_item;
pub mod subject;
pub mod subscription;

pub use self::checkpoint::Checkpoint;
pub use self::error::{FluxError, Result, ResultExt, StateError};
pub use self::into_stream::{to_stream, ObservableStream};
pub use self::notification::Notification;
pub use self::observable::{boxed, BoxObservable, Observable};
pub use self::observer::{observer_fn, BoxObserver, FnObserver, Observer};
pub use self::sink::Sink;
pub use self::sources::{empty, from_iter, never, throw};
pub use self::state::{load, save, OperatorState, StateBlob, StatefulOperator};
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subscription::Subscription;
