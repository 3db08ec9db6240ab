// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local sqlite execution via the sqlite3 CLI

use std::sync::Arc;

use async_trait::async_trait;
use cb_core::{meta, mime, unique_name, Contributor, MetadataField, Outcome};
use cb_exec::ProcessExecutor;

use crate::checks::{CompatibilityChecker, ExecutableCheck, ExecutableCompatibility};
use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;
use crate::handlers::CollectHandler;
use crate::temp::TempArtifact;

const EXEC_CMD: &str = "sqlite3 {db} -header -column {sql}";

/// Runs the cell's SQL through the sqlite3 client in column mode and
/// classifies the fixed-width console output into table payloads. Without a
/// `db-path` metadata value, a throwaway database file is used and removed
/// with the run.
pub struct SqliteController {
    compat: ExecutableCompatibility,
}

impl SqliteController {
    pub fn new() -> Self {
        Self {
            compat: ExecutableCompatibility::new(vec![Arc::new(
                ExecutableCheck::new("sqlite client", "sqlite3").version_args(&["--version"]),
            )]),
        }
    }
}

impl Default for SqliteController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for SqliteController {
    fn id(&self) -> &str {
        "sqlite-local"
    }

    fn label(&self) -> &str {
        "SQLite"
    }

    fn supported_languages(&self) -> &[&str] {
        &["sql"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Execute SQLite code")
    }

    fn description(&self) -> Option<&str> {
        Some("Execute SQLite code locally")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        Some(&self.compat)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        // A provided database outlives the run; a generated one must not.
        let mut throwaway: Option<TempArtifact> = None;
        let db_path = match ex.meta_or_notebook(meta::DB_PATH) {
            Some(path) => path.to_string(),
            None => {
                let artifact = TempArtifact::new()?;
                let path = artifact.file_path(&unique_name("notebook", ".db"));
                throwaway = Some(artifact);
                path.to_string_lossy().to_string()
            }
        };

        let executor = ProcessExecutor::new(EXEC_CMD)?
            .replace_token("{db}", &db_path)
            .replace_token("{sql}", &ex.cell().content);

        let collector = CollectHandler::new();
        executor.execute(&collector, ex.token()).await;
        drop(throwaway);

        if collector.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }
        let mut errors = collector.failures();
        errors.extend(collector.stderr());
        if !errors.is_empty() {
            for error in errors {
                ex.append_error_output(error);
            }
            return Ok(Outcome::Failure);
        }

        let output = collector.output();
        let tables = cb_classify::classify_tables(&output);
        if tables.is_empty() {
            // Non-tabular statements still show their raw output.
            if !output.trim().is_empty() {
                ex.append_text_output(output);
            }
            return Ok(Outcome::Success);
        }
        for table in tables {
            ex.append_json_output(serde_json::to_value(&table)?, Some(mime::SQL_TABLE));
        }
        Ok(Outcome::Success)
    }
}

impl OnControllerInfo for SqliteController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("sqlite.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("sqlite.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        vec![MetadataField::new(meta::DB_PATH)
            .description("path to the database file; a temporary database is used when absent")]
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
