// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON validation and display

use async_trait::async_trait;
use cb_core::{Contributor, Outcome};

use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;

/// Validates the cell as JSON. Valid content is re-emitted as a structured
/// JSON output; parse failures become positioned error outputs.
pub struct JsonController;

#[async_trait]
impl Controller for JsonController {
    fn id(&self) -> &str {
        "json"
    }

    fn label(&self) -> &str {
        "JSON"
    }

    fn supported_languages(&self) -> &[&str] {
        &["json"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Display and validate JSON")
    }

    fn description(&self) -> Option<&str> {
        Some("Interpreting and validating JSON content")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        match serde_json::from_str::<serde_json::Value>(&ex.cell().content) {
            Ok(value) => {
                ex.append_json_output(value, None);
                Ok(Outcome::Success)
            }
            Err(e) => {
                ex.append_error_output(format!("[{};{}]: {e}", e.line(), e.column()));
                Ok(Outcome::Failure)
            }
        }
    }
}

impl OnControllerInfo for JsonController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("json.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("json.md")
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
