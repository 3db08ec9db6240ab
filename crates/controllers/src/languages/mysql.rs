// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MySQL execution via the mysql client's XML output mode

use std::sync::Arc;

use async_trait::async_trait;
use cb_core::{meta, mime, Contributor, MetadataField, Outcome};
use cb_exec::ProcessExecutor;

use crate::checks::{CompatibilityChecker, ExecutableCheck, ExecutableCompatibility};
use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;
use crate::handlers::CollectHandler;

const EXEC_CMD: &str = "mysql -X -h {host} -P {port} -u {user} -D {db} -e {sql}";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: &str = "3306";
const DEFAULT_DB_USER: &str = "root";
const MYSQL_PASS_ENV: &str = "MYSQL_PWD";

/// Runs the cell's SQL through the mysql client with `-X`, so results come
/// back as XML envelopes the field-record classifier understands.
/// Connection settings resolve cell metadata first, then notebook metadata,
/// then defaults; the password travels via `MYSQL_PWD`, never the command
/// line.
pub struct MySqlController {
    compat: ExecutableCompatibility,
}

impl MySqlController {
    pub fn new() -> Self {
        Self {
            compat: ExecutableCompatibility::new(vec![Arc::new(
                ExecutableCheck::new("mysql client", "mysql").version_args(&["--version"]),
            )]),
        }
    }

    fn db_fields() -> Vec<MetadataField> {
        vec![
            MetadataField::new(meta::DB_HOST)
                .default_value(DEFAULT_DB_HOST)
                .description("database host"),
            MetadataField::new(meta::DB_PORT)
                .default_value(DEFAULT_DB_PORT)
                .description("database port"),
            MetadataField::new(meta::DB_USER)
                .default_value(DEFAULT_DB_USER)
                .description("database user name"),
            MetadataField::new(meta::DB_PASS)
                .description("database user password, required if user has password")
                .required(),
            MetadataField::new(meta::DB_NAME).description("database name").required(),
        ]
    }
}

impl Default for MySqlController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for MySqlController {
    fn id(&self) -> &str {
        "mysql"
    }

    fn label(&self) -> &str {
        "MySQL"
    }

    fn supported_languages(&self) -> &[&str] {
        &["sql"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Execute MySQL script")
    }

    fn description(&self) -> Option<&str> {
        Some("Execute MySQL code using mysql client")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        Some(&self.compat)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let host = ex.meta_or_notebook(meta::DB_HOST).unwrap_or(DEFAULT_DB_HOST);
        let port = ex.meta_or_notebook(meta::DB_PORT).unwrap_or(DEFAULT_DB_PORT);
        let user = ex.meta_or_notebook(meta::DB_USER).unwrap_or(DEFAULT_DB_USER);
        let password = ex.meta_or_notebook(meta::DB_PASS).unwrap_or_default().to_string();
        let Some(db) = ex.meta_or_notebook(meta::DB_NAME) else {
            return Err(ControllerError::MissingMetadata(meta::DB_NAME));
        };

        let executor = ProcessExecutor::new(EXEC_CMD)?
            .replace_token("{host}", host)
            .replace_token("{port}", port)
            .replace_token("{user}", user)
            .replace_token("{db}", db)
            .replace_token("{sql}", &ex.cell().content)
            .env(MYSQL_PASS_ENV, password);

        let collector = CollectHandler::new();
        executor.execute(&collector, ex.token()).await;

        if collector.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }
        let mut errors = collector.failures();
        errors.extend(collector.stderr());
        if !errors.is_empty() {
            // The client splits one failure across lines; report it as one.
            ex.append_error_output(errors.concat());
            return Ok(Outcome::Failure);
        }

        for table in cb_classify::classify_xml_tables(&collector.output()) {
            ex.append_json_output(serde_json::to_value(&table)?, Some(mime::SQL_TABLE));
        }
        Ok(Outcome::Success)
    }
}

impl OnControllerInfo for MySqlController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("mysql.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("mysql.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        Self::db_fields()
    }

    fn notebook_metadata(&self) -> Vec<MetadataField> {
        Self::db_fields()
            .into_iter()
            .map(|mut f| {
                f.description = f
                    .description
                    .map(|d| format!("{d}\n(can be overwritten with the cell metadata value)"));
                f
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mysql_tests.rs"]
mod tests;
