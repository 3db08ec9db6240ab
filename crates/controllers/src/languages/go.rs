// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local go execution

use std::sync::Arc;

use async_trait::async_trait;
use cb_classify::GoTestClassifier;
use cb_core::{meta, mime, Contributor, MetadataField, Outcome, TestStatus};
use cb_exec::ProcessExecutor;

use crate::checks::{CompatibilityChecker, ExecutableCheck, ExecutableCompatibility};
use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;
use crate::handlers::{CollectHandler, SinkHandler};
use crate::temp::TempArtifact;

const DEFAULT_EXECUTION_CMD: &str = "go run {xprog}";
const TEST_CMD_MARKER: &str = "go test";

/// Runs go code on the local toolchain. A `go test` execution template
/// switches to test mode: the transcript is classified into a test tree
/// instead of streamed as text, and the classifier's verdict decides
/// success independent of stderr chatter.
pub struct GoController {
    compat: ExecutableCompatibility,
}

impl GoController {
    pub fn new() -> Self {
        Self {
            compat: ExecutableCompatibility::new(vec![Arc::new(
                ExecutableCheck::new("go toolchain", "go").version_args(&["version"]),
            )]),
        }
    }
}

impl Default for GoController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for GoController {
    fn id(&self) -> &str {
        "go-local"
    }

    fn label(&self) -> &str {
        "Go local compiler"
    }

    fn supported_languages(&self) -> &[&str] {
        &["go"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Run go code on local machine")
    }

    fn description(&self) -> Option<&str> {
        Some("Local go execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        Some(&self.compat)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let template = ex.command_template(DEFAULT_EXECUTION_CMD);
        let is_test = template.contains(TEST_CMD_MARKER);

        let artifact = TempArtifact::new()?;
        // Test sources must keep the `_test.go` suffix for the toolchain.
        let path = if is_test {
            artifact.write_unique("notebook", "_test.go", &ex.cell().content)?
        } else {
            artifact.write_unique("notebook", ".go", &ex.cell().content)?
        };

        let executor = ProcessExecutor::new(&template)?
            .replace_token(meta::EXEC_FILE_TOKEN, &path.to_string_lossy());

        if is_test {
            let collector = CollectHandler::new();
            executor.execute(&collector, ex.token()).await;

            if collector.was_canceled() {
                ex.append_text_output("Canceled");
                return Ok(Outcome::Canceled);
            }
            let failures = collector.failures();
            if !failures.is_empty() {
                for failure in failures {
                    ex.append_error_output(failure);
                }
                return Ok(Outcome::Failure);
            }
            for err in collector.stderr() {
                ex.append_error_output(err);
            }

            let result = GoTestClassifier::new(&collector.output()).classify();
            let success = result.result_status == TestStatus::Pass;
            ex.append_json_output(serde_json::to_value(&result)?, Some(mime::STD_TEST));
            return Ok(if success { Outcome::Success } else { Outcome::Failure });
        }

        let handler = SinkHandler::new(ex);
        executor.execute(&handler, ex.token()).await;

        if handler.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }
        Ok(if handler.saw_error() { Outcome::Failure } else { Outcome::Success })
    }
}

impl OnControllerInfo for GoController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("go-local.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("go-local.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        vec![MetadataField::new(meta::EXECUTION)
            .default_value(DEFAULT_EXECUTION_CMD)
            .description(format!(
                "execution command, where {} is the path to the temporary file to execute",
                meta::EXEC_FILE_TOKEN
            ))]
    }
}

#[cfg(test)]
#[path = "go_tests.rs"]
mod tests;
