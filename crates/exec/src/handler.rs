// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution handler contract

use async_trait::async_trait;

use crate::error::ExecError;

/// Callback surface the executor pushes into while a process runs.
///
/// `output`, `error` and `canceled` are the mandatory channels. `input` and
/// `clear` are optional: they are only reached by the in-stream control
/// protocol, and their defaults make a handler without interactive support
/// behave as if the protocol were absent.
#[async_trait]
pub trait ExecHandler: Send + Sync {
    /// A chunk of process stdout, in emission order.
    async fn output(&self, chunk: &str);

    /// A spawn failure, stream failure, or stderr content.
    async fn error(&self, err: ExecError);

    /// The run was terminated by its cancellation signal. Called at most
    /// once, after the last delivered chunk.
    async fn canceled(&self);

    /// The process asked for interactive input. Returning `None` leaves the
    /// prompt unanswered (the channel is unsupported).
    async fn input(&self, _prompt: Option<&str>) -> Option<String> {
        None
    }

    /// Clear previously emitted output.
    async fn clear(&self) {}
}
