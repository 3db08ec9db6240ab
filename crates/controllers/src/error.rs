// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller-level errors
//!
//! Everything here is caught at the registry boundary and converted into an
//! error-kind output item plus a failed outcome — executions never stay
//! pending and errors never escape to the host.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    Exec(#[from] cb_exec::ExecError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("script error: {0}")]
    Script(#[from] mlua::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("please provide a {0} metadata field")]
    MissingMetadata(&'static str),

    #[error("{0}")]
    Other(String),
}
