// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One scheduled run of one cell

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cb_core::{meta, Cell, Metadata, Notebook, OutputItem, OutputSink};
use tokio_util::sync::CancellationToken;

/// Supplies replies for interactive input prompts. Installed by the host UI
/// layer; executions without one leave prompts unanswered.
#[async_trait]
pub trait InputProvider: Send + Sync {
    async fn request(&self, prompt: Option<&str>) -> Option<String>;
}

/// Everything a controller gets for one run: the cell snapshot, its ordinal
/// index, a read-only sibling view, the cancellation signal and the output
/// sink. Created per scheduled run and never reused.
pub struct Execution {
    cell: Cell,
    cell_index: usize,
    notebook: Arc<Notebook>,
    cancel: CancellationToken,
    sink: OutputSink,
    input: Option<Arc<dyn InputProvider>>,
}

impl Execution {
    pub fn new(
        cell: Cell,
        cell_index: usize,
        notebook: Arc<Notebook>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            cell,
            cell_index,
            notebook,
            cancel,
            sink: OutputSink::new(),
            input: None,
        }
    }

    pub fn with_input_provider(mut self, provider: Arc<dyn InputProvider>) -> Self {
        self.input = Some(provider);
        self
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn cell_index(&self) -> usize {
        self.cell_index
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub(crate) fn input_provider(&self) -> Option<Arc<dyn InputProvider>> {
        self.input.clone()
    }

    pub fn append_text_output(&self, text: impl Into<String>) {
        self.sink.append_text(text);
    }

    pub fn append_text_with(
        &self,
        text: impl Into<String>,
        mime: Option<&str>,
        metadata: Option<Metadata>,
    ) {
        self.sink.append_text_with(text, mime, metadata);
    }

    pub fn append_json_output(&self, value: serde_json::Value, mime: Option<&str>) {
        self.sink.append_json(value, mime);
    }

    pub fn append_error_output(&self, message: impl Into<String>) {
        self.sink.append_error(message);
    }

    pub fn clear_output(&self) {
        self.sink.clear();
    }

    /// Sealed view of everything appended so far.
    pub fn outputs(&self) -> Vec<OutputItem> {
        self.sink.snapshot()
    }

    /// Pause this execution (used to reproduce server-reported pacing).
    pub async fn delay(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Metadata lookup with notebook-level fallback.
    pub fn meta_or_notebook(&self, key: &str) -> Option<&str> {
        self.cell.meta_str(key).or_else(|| self.notebook.meta_str(key))
    }

    /// Resolve the execution command template: cell metadata, then notebook
    /// metadata, then the controller's documented default.
    pub fn command_template(&self, default: &str) -> String {
        self.meta_or_notebook(meta::EXECUTION).unwrap_or(default).trim().to_string()
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
