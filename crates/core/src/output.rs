// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged output items and the per-execution output buffer

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::cell::Metadata;

/// Mime types understood by the external renderers.
///
/// The core never interprets these beyond tagging; each value selects which
/// renderer displays the item.
pub mod mime {
    pub const STD_ERROR: &str = "application/vnd.code.notebook.error";
    pub const STD_TEST: &str = "application/cellbook.test";
    pub const PLAIN_TEXT: &str = "text/plain";
    pub const HTML: &str = "text/html";
    pub const SQL_TABLE: &str = "application/cellbook.sql.table";
    pub const MARKDOWN_EXT: &str = "application/cellbook.text.markdown";
}

/// One item of captured execution output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputItem {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
    Json {
        value: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
}

impl OutputItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into(), mime: None, metadata: None }
    }

    pub fn text_with(
        text: impl Into<String>,
        mime: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self::Text { text: text.into(), mime: mime.map(str::to_string), metadata }
    }

    pub fn json(value: serde_json::Value, mime: Option<&str>) -> Self {
        Self::Json { value, mime: mime.map(str::to_string), metadata: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into(), metadata: None }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn mime(&self) -> Option<&str> {
        match self {
            Self::Text { mime, .. } | Self::Json { mime, .. } => mime.as_deref(),
            Self::Error { .. } => Some(mime::STD_ERROR),
        }
    }

    /// Text payload, if this is a text item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Ordered, clearable output buffer shared between a controller, its
/// execution and the script hook.
///
/// Items are appended in emission order. `clear` drops everything appended
/// before it and never anything appended after — the handle hands out
/// snapshots, so a consumer can only observe a prefix-consistent view.
#[derive(Clone, Default)]
pub struct OutputSink {
    items: Arc<Mutex<Vec<OutputItem>>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, item: OutputItem) {
        self.items.lock().push(item);
    }

    pub fn append_text(&self, text: impl Into<String>) {
        self.append(OutputItem::text(text));
    }

    pub fn append_text_with(
        &self,
        text: impl Into<String>,
        mime: Option<&str>,
        metadata: Option<Metadata>,
    ) {
        self.append(OutputItem::text_with(text, mime, metadata));
    }

    pub fn append_json(&self, value: serde_json::Value, mime: Option<&str>) {
        self.append(OutputItem::json(value, mime));
    }

    pub fn append_error(&self, message: impl Into<String>) {
        self.append(OutputItem::error(message));
    }

    /// Drop all previously appended items.
    pub fn clear(&self) {
        self.items.lock().clear();
    }

    pub fn snapshot(&self) -> Vec<OutputItem> {
        self.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
