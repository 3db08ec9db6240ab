// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution errors

use thiserror::Error;

/// Errors surfaced through [`ExecHandler::error`](crate::ExecHandler::error).
#[derive(Debug, Error)]
pub enum ExecError {
    /// The target executable is not on PATH (spawn `NotFound`), rewritten
    /// to name the missing program instead of the raw OS error.
    #[error("could not find '{0}' executable")]
    MissingExecutable(String),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Content the process wrote to stderr.
    #[error("{0}")]
    Stderr(String),

    #[error("empty command")]
    EmptyCommand,

    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
}
