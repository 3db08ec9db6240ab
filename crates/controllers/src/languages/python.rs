// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local python execution

use std::sync::Arc;

use async_trait::async_trait;
use cb_core::{meta, Contributor, MetadataField, Outcome};
use cb_exec::{CommandLine, ProcessExecutor};

use crate::checks::{CompatibilityChecker, ExecutableCheck, ExecutableCompatibility};
use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;
use crate::handlers::SinkHandler;
use crate::temp::TempArtifact;

const DEFAULT_EXECUTION_CMD: &str = "python3";

/// Runs python code through the local interpreter. The interpreter's
/// form-feed clear convention is honored by the executor's stream scanning,
/// so interactive-style scripts can redraw their output.
pub struct PythonController {
    compat: ExecutableCompatibility,
}

impl PythonController {
    pub fn new() -> Self {
        Self {
            compat: ExecutableCompatibility::new(vec![Arc::new(
                ExecutableCheck::new("python interpreter", "python3").version_args(&["--version"]),
            )]),
        }
    }
}

impl Default for PythonController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for PythonController {
    fn id(&self) -> &str {
        "py-local"
    }

    fn label(&self) -> &str {
        "Python Local"
    }

    fn supported_languages(&self) -> &[&str] {
        &["python"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Run python code on local machine")
    }

    fn description(&self) -> Option<&str> {
        Some("Local python execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        Some(&self.compat)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let template = ex.command_template(DEFAULT_EXECUTION_CMD);

        let artifact = TempArtifact::new()?;
        let path = artifact.write_unique("notebook", ".py", &ex.cell().content)?;
        let path = path.to_string_lossy();

        // A template without the placeholder gets the script path appended.
        let command = CommandLine::parse(&template)?;
        let command = if template.contains(meta::EXEC_FILE_TOKEN) {
            command.replace_token(meta::EXEC_FILE_TOKEN, &path)
        } else {
            command.arg(&path)
        };

        let handler = SinkHandler::new(ex);
        ProcessExecutor::from_command(command).execute(&handler, ex.token()).await;

        if handler.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }
        Ok(if handler.saw_error() { Outcome::Failure } else { Outcome::Success })
    }
}

impl OnControllerInfo for PythonController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("py-local.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("py-local.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        vec![MetadataField::new(meta::EXECUTION)
            .default_value(DEFAULT_EXECUTION_CMD)
            .description(format!(
                "interpreter command; {} (optional) is replaced with the temporary script path",
                meta::EXEC_FILE_TOKEN
            ))]
    }
}

#[cfg(test)]
#[path = "python_tests.rs"]
mod tests;
