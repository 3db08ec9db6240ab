// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reserved metadata keys and the controller metadata pass-through contract

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved cell metadata key holding the per-cell script hook. The `$`
/// prefix keeps it out of the user metadata namespace.
pub const SCRIPT: &str = "$script";

/// Execution command template key. The template may contain
/// [`EXEC_FILE_TOKEN`], replaced with the temp artifact path.
pub const EXECUTION: &str = "execution";

/// Placeholder token substituted with the temp artifact path.
pub const EXEC_FILE_TOKEN: &str = "{xprog}";

pub const FILE_NAME: &str = "file-name";
pub const IS_EXECUTABLE: &str = "is-executable";
pub const IMPORT: &str = "import";
pub const CELL_ID: &str = "id";

pub const DB_HOST: &str = "db-host";
pub const DB_PORT: &str = "db-port";
pub const DB_USER: &str = "db-user";
pub const DB_PASS: &str = "db-pass";
pub const DB_NAME: &str = "db-name";
pub const DB_PATH: &str = "db-path";

/// Frame-size hints consumed by the HTML renderer.
pub const FRAME_WIDTH: &str = "frame-width";
pub const FRAME_HEIGHT: &str = "frame-height";

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("invalid {key} metadata: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Describes one metadata key a controller understands. Presentation
/// contract only — the core passes it through to the host untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl MetadataField {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn allowed(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Controller contributor attribution. Presentation pass-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Contributor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), email: None, url: None }
    }
}

/// Interpreter kind of a cell script hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Lua,
}

/// The `$script` metadata payload: a user script with `before`/`after`
/// callbacks evaluated around the cell's real execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookScript {
    pub kind: HookKind,
    pub code: String,
}

impl HookScript {
    /// Parse the reserved `$script` metadata value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, MetaError> {
        serde_json::from_value(value.clone()).map_err(|e| MetaError::Invalid {
            key: SCRIPT,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
