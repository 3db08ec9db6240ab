// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-width console table classifier
//!
//! Parses the output of column-mode query renderers (sqlite3
//! `-header -column` and friends): a header line, a `-`-filled delimiter
//! line giving each column's width, then data rows. A transcript may hold
//! several result tables back to back.

use cb_core::SqlTableResult;

/// Parse every fixed-width table found in `text`, in order of appearance.
pub fn classify_tables(text: &str) -> Vec<SqlTableResult> {
    let lines: Vec<&str> = text.lines().collect();
    let delimiters: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_delimiter_row(line))
        .map(|(i, _)| i)
        .collect();

    let mut tables = Vec::with_capacity(delimiters.len());
    for (k, &d) in delimiters.iter().enumerate() {
        // The line above the delimiter names the columns.
        if d == 0 {
            continue;
        }
        let widths: Vec<usize> = split_wide(lines[d]).iter().map(|t| t.chars().count()).collect();
        let columns = cut_row(lines[d - 1], &widths);

        // Data rows run until the next table's header line.
        let end = delimiters
            .get(k + 1)
            .map(|&next| next.saturating_sub(1))
            .unwrap_or(lines.len())
            .max(d + 1);

        let mut table = SqlTableResult::new();
        for column in &columns {
            table.push_column(column);
        }
        for line in &lines[d + 1..end] {
            if line.trim().is_empty() {
                continue;
            }
            for (column, cell) in columns.iter().zip(cut_row(line, &widths)) {
                table.push_cell(column, cell);
            }
        }
        tables.push(table);
    }

    tables
}

/// A delimiter row has at least one token and every token starts with `-`.
fn is_delimiter_row(line: &str) -> bool {
    let tokens = split_wide(line);
    !tokens.is_empty() && tokens.iter().all(|t| t.starts_with('-'))
}

/// Split on runs of two-or-more spaces (single spaces may occur inside a
/// column's content).
fn split_wide(line: &str) -> Vec<&str> {
    line.split("  ")
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Cut one line into cells by consuming each delimiter token's character
/// width (skipping the two-space column gap), trimming whitespace. The last
/// column takes the remainder. Short lines yield empty trailing cells.
fn cut_row(line: &str, widths: &[usize]) -> Vec<String> {
    let mut rest = line;
    let mut cells = Vec::with_capacity(widths.len());
    for (i, &width) in widths.iter().enumerate() {
        if i + 1 == widths.len() {
            cells.push(rest.trim().to_string());
        } else {
            let (cell, tail) = take_chars(rest, width);
            cells.push(cell.trim().to_string());
            rest = tail.strip_prefix("  ").unwrap_or(tail);
        }
    }
    cells
}

/// Char-boundary-safe prefix split.
fn take_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
