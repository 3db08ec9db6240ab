// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured classifier results: test trees and query tables

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Test verdict; a node stays `Fail` until a result line confirms `Pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

/// One node in the hierarchical test tree. Nesting mirrors the
/// `/`-delimited subtest names of the source transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestResult>,
}

impl TestResult {
    /// New node with the default (unconfirmed) `Fail` status.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Fail,
            msg: None,
            time: None,
            children: Vec::new(),
        }
    }
}

/// Root payload for the test-tree renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTestResult {
    #[serde(rename = "resultStatus")]
    pub result_status: TestStatus,
    #[serde(rename = "testsFailed", default, skip_serializing_if = "Option::is_none")]
    pub tests_failed: Option<u32>,
    pub tests: Vec<TestResult>,
}

/// One query result table: insertion-ordered duplicate-free columns, with
/// per-column cell sequences. Row `i` across all columns is one logical row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqlTableResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: IndexSet<String>,
    pub rows: HashMap<String, Vec<String>>,
}

impl SqlTableResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column (with no cells yet) if it is not already present.
    pub fn push_column(&mut self, name: &str) {
        if !self.columns.contains(name) {
            self.columns.insert(name.to_string());
            self.rows.entry(name.to_string()).or_default();
        }
    }

    /// Append one cell to `column`, registering the column on first use.
    pub fn push_cell(&mut self, column: &str, value: impl Into<String>) {
        if !self.columns.contains(column) {
            self.columns.insert(column.to_string());
        }
        self.rows.entry(column.to_string()).or_default().push(value.into());
    }

    /// Number of logical rows (length of the first column).
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .and_then(|c| self.rows.get(c))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// True when every registered column has the same number of cells.
    pub fn is_rectangular(&self) -> bool {
        let expected = self.row_count();
        self.columns
            .iter()
            .all(|c| self.rows.get(c).map(Vec::len).unwrap_or(0) == expected)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
