// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notebook cell snapshots

use serde::{Deserialize, Serialize};

use crate::output::OutputItem;

/// Open string-keyed metadata map carried by cells and notebooks.
///
/// Host interop requires the open shape; controllers narrow the keys they
/// document into typed values immediately on use and never pass the map
/// further down.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// What kind of content a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Source code that can be executed and produces output.
    Code,
    /// Markup (markdown) used for display only.
    Markup,
}

/// A read-only snapshot of one notebook cell, taken per execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Language identifier (like `go`, `python`, `sql`, `markdown`).
    pub language_id: String,
    /// Cell source text.
    pub content: String,
    pub kind: CellKind,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    /// Captured outputs of the previous run, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<OutputItem>,
}

impl Cell {
    pub fn new(language_id: impl Into<String>, content: impl Into<String>, kind: CellKind) -> Self {
        Self {
            language_id: language_id.into(),
            content: content.into(),
            kind,
            metadata: Metadata::new(),
            outputs: Vec::new(),
        }
    }

    /// Code cell shorthand.
    pub fn code(language_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(language_id, content, CellKind::Code)
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// String-typed metadata lookup. Non-string values return `None`.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn meta_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

/// Read-only view of the notebook a cell belongs to.
///
/// Controllers use it for sibling-cell lookups (cross-cell imports) and for
/// notebook-level metadata fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, metadata: Metadata::new() }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }

    /// Find the first cell whose metadata `key` equals `value`.
    pub fn find_by_meta(&self, key: &str, value: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.meta_str(key) == Some(value))
    }
}

#[cfg(test)]
#[path = "cell_tests.rs"]
mod tests;
