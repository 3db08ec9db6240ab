// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote java execution against a cloud compile API

use async_trait::async_trait;
use cb_core::{Contributor, MetadataField, Outcome};
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;

const COMPILE_URL: &str = "https://onecompiler.com/api/code/exec";
/// Notebook metadata override for the compile endpoint.
const COMPILE_URL_META: &str = "compile-url";
const DEFAULT_FILE_NAME: &str = "Main.java";

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    properties: CompileProperties<'a>,
}

#[derive(Debug, Serialize)]
struct CompileProperties<'a> {
    language: &'a str,
    files: Vec<CompileFile<'a>>,
}

#[derive(Debug, Serialize)]
struct CompileFile<'a> {
    name: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    exception: Option<String>,
    stdout: Option<String>,
    stderr: Option<String>,
}

/// Ships the cell to a remote compile API as a single `Main.java` file and
/// maps the JSON response onto the output contract. The execution's
/// cancellation signal aborts the in-flight request.
pub struct JavaCloudController {
    client: reqwest::Client,
}

impl JavaCloudController {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for JavaCloudController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for JavaCloudController {
    fn id(&self) -> &str {
        "java-one"
    }

    fn label(&self) -> &str {
        "Java One"
    }

    fn supported_languages(&self) -> &[&str] {
        &["java"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Request to the https://onecompiler.com/api/code/exec")
    }

    fn description(&self) -> Option<&str> {
        Some("Remote java execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let url = ex.meta_or_notebook(COMPILE_URL_META).unwrap_or(COMPILE_URL).to_string();
        let request = CompileRequest {
            kind: "code",
            properties: CompileProperties {
                language: "java",
                files: vec![CompileFile {
                    name: DEFAULT_FILE_NAME,
                    content: ex.cell().content.as_str(),
                }],
            },
        };

        let send = async {
            self.client.post(&url).json(&request).send().await?.json::<CompileResponse>().await
        };
        let resp = tokio::select! {
            biased;

            _ = ex.token().cancelled() => {
                ex.append_text_output("Canceled");
                return Ok(Outcome::Canceled);
            }
            resp = send => resp?,
        };

        if ex.is_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }

        let success = resp.exception.is_none();
        if let Some(stdout) = resp.stdout.filter(|s| !s.is_empty()) {
            ex.append_text_output(stdout);
        }
        if let Some(err) = resp.exception.or(resp.stderr).filter(|e| !e.is_empty()) {
            ex.append_error_output(err);
        }

        Ok(Outcome::from_flag(Some(success)))
    }
}

impl OnControllerInfo for JavaCloudController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("java-one.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("java-one.md")
    }

    fn notebook_metadata(&self) -> Vec<MetadataField> {
        vec![MetadataField::new(COMPILE_URL_META)
            .default_value(COMPILE_URL)
            .description("compile service endpoint")]
    }
}

#[cfg(test)]
#[path = "java_cloud_tests.rs"]
mod tests;
