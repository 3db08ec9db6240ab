// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! XML field-record table classifier
//!
//! Parses the XML envelope mode of console database clients (mysql `-X`):
//! one envelope per statement, each a `<resultset>` of `<row>` elements
//! holding `<field name="...">value</field>` records. Field records are
//! grouped by name into column arrays; the record grammar is three fixed
//! patterns, so a scanning regex does the job.

use std::sync::LazyLock;

use cb_core::SqlTableResult;
use regex::Regex;

/// Envelope delimiter: every statement's result starts with a declaration.
const XML_DECL: &str = "<?xml version=\"1.0\"?>";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<field name="([^"]*)"[^>]*?(?:/>|>(.*?)</field>)"#)
        .expect("constant regex pattern is valid")
});

/// Parse every XML-enveloped result table in `text`, in order of
/// appearance. Envelopes without field records yield no table.
pub fn classify_xml_tables(text: &str) -> Vec<SqlTableResult> {
    text.split(XML_DECL)
        .filter(|envelope| !envelope.trim().is_empty())
        .filter_map(classify_envelope)
        .collect()
}

fn classify_envelope(envelope: &str) -> Option<SqlTableResult> {
    let mut table = SqlTableResult::new();
    for capture in FIELD_PATTERN.captures_iter(envelope) {
        let name = decode_entities(&capture[1]);
        // Self-closing fields (NULL values) become empty cells.
        let value = capture.get(2).map(|m| decode_entities(m.as_str())).unwrap_or_default();
        table.push_cell(&name, value);
    }
    if table.is_empty() {
        return None;
    }
    Some(table)
}

/// The five XML built-in entities.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "xmlfield_tests.rs"]
mod tests;
