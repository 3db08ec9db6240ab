// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote go execution against the playground compile service

use async_trait::async_trait;
use cb_classify::GoTestClassifier;
use cb_core::{mime, Contributor, MetadataField, Outcome};
use serde::Deserialize;

use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;

const COMPILE_URL: &str = "https://play.golang.org/compile";
/// Notebook metadata override for the compile endpoint.
const COMPILE_URL_META: &str = "play-url";

const STDOUT_KIND: &str = "stdout";
const STDERR_KIND: &str = "stderr";

#[derive(Debug, Deserialize)]
struct CompileResponse {
    #[serde(rename = "Errors")]
    errors: Option<String>,
    #[serde(rename = "Events")]
    events: Option<Vec<CompileEvent>>,
    #[serde(rename = "IsTest")]
    is_test: Option<bool>,
    #[serde(rename = "Status")]
    status: Option<i32>,
    #[serde(rename = "TestsFailed")]
    tests_failed: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompileEvent {
    /// Server-reported pause before this event, in nanoseconds.
    #[serde(rename = "Delay")]
    delay: Option<u64>,
    #[serde(rename = "Kind")]
    kind: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// Sends the cell body to the playground's compile endpoint and replays the
/// response events with their reported pacing. Test envelopes carry their
/// own authoritative verdict and failure count.
pub struct GoPlaygroundController {
    client: reqwest::Client,
}

impl GoPlaygroundController {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    async fn replay_events(
        &self,
        ex: &Execution,
        events: Vec<CompileEvent>,
    ) -> Result<Option<Outcome>, ControllerError> {
        for event in events {
            if let Some(ns) = event.delay.filter(|ns| *ns > 0) {
                tokio::select! {
                    _ = ex.token().cancelled() => {
                        ex.append_text_output("Canceled");
                        return Ok(Some(Outcome::Canceled));
                    }
                    _ = ex.delay(ns / 1_000_000) => {}
                }
            }
            let Some(mut message) = event.message else {
                continue;
            };
            if let Some(rest) = message.strip_prefix('\u{000c}') {
                ex.clear_output();
                message = rest.to_string();
            }
            match event.kind.as_deref() {
                Some(STDERR_KIND) => ex.append_error_output(message),
                Some(STDOUT_KIND) => ex.append_text_output(message),
                _ => {}
            }
        }
        Ok(None)
    }

    fn resolve_tests(ex: &Execution, resp: &CompileResponse) {
        let transcript = resp
            .events
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|e| e.message.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        let result = GoTestClassifier::new(&transcript)
            .passed(Some(resp.tests_failed == Some(0)))
            .tests_failed(Some(resp.tests_failed.unwrap_or(0)))
            .classify();
        if let Ok(value) = serde_json::to_value(&result) {
            ex.append_json_output(value, Some(mime::STD_TEST));
        }
    }
}

impl Default for GoPlaygroundController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for GoPlaygroundController {
    fn id(&self) -> &str {
        "go-play"
    }

    fn label(&self) -> &str {
        "Go playground"
    }

    fn supported_languages(&self) -> &[&str] {
        &["go"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Request to the https://play.golang.org/compile")
    }

    fn description(&self) -> Option<&str> {
        Some("Remote go execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let url = ex.meta_or_notebook(COMPILE_URL_META).unwrap_or(COMPILE_URL).to_string();
        let form = [
            ("version", "2"),
            ("body", ex.cell().content.as_str()),
            ("withVet", "true"),
        ];

        // The same cancellation signal aborts the in-flight request.
        let request = async {
            self.client
                .post(&url)
                .form(&form)
                .send()
                .await?
                .json::<CompileResponse>()
                .await
        };
        let resp = tokio::select! {
            biased;

            _ = ex.token().cancelled() => {
                ex.append_text_output("Canceled");
                return Ok(Outcome::Canceled);
            }
            resp = request => resp?,
        };

        let success = resp.status.unwrap_or(0) == 0;

        if resp.is_test == Some(true) {
            Self::resolve_tests(ex, &resp);
            return Ok(Outcome::from_flag(Some(success)));
        }

        if let Some(errors) = resp.errors.as_deref().filter(|e| !e.is_empty()) {
            ex.append_error_output(errors);
            return Ok(Outcome::Failure);
        }

        let Some(events) = resp.events else {
            return Ok(Outcome::from_flag(Some(success)));
        };
        if let Some(outcome) = self.replay_events(ex, events).await? {
            return Ok(outcome);
        }

        Ok(Outcome::from_flag(Some(success)))
    }
}

impl OnControllerInfo for GoPlaygroundController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("go-play.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("go-play.md")
    }

    fn notebook_metadata(&self) -> Vec<MetadataField> {
        vec![MetadataField::new(COMPILE_URL_META)
            .default_value(COMPILE_URL)
            .description("compile service endpoint")]
    }
}

#[cfg(test)]
#[path = "go_cloud_tests.rs"]
mod tests;
