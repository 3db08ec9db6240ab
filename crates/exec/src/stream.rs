// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-stream control protocol scanning
//!
//! Raw stdout chunks are multiplexed into an ordered action sequence: plain
//! output, interactive input requests, and clear markers. Two mechanisms
//! coexist:
//!
//! - marker lines: a line that is exactly [`CLEAR_TAG`], or starts with
//!   [`INPUT_TAG`] optionally followed by `-> <prompt>`;
//! - a form feed (U+000C) at the start of a chunk, meaning "clear previous
//!   output before appending this chunk" — used by programs that never
//!   speak the marker grammar.

/// Reserved whole-line tag requesting interactive input.
pub const INPUT_TAG: &str = "::input::";
/// Reserved whole-line tag clearing previously emitted output.
pub const CLEAR_TAG: &str = "::clear::";

const FORM_FEED: char = '\u{000c}';

/// One ordered action produced from the raw stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamAction {
    Output(String),
    Input(Option<String>),
    Clear,
}

/// Incremental scanner over one output stream.
///
/// Chunks arrive at arbitrary boundaries; a trailing partial line is held
/// back only while it could still turn into a control marker, so ordinary
/// output keeps streaming without waiting for newlines. Anything queued
/// before a marker is flushed ahead of it.
#[derive(Debug, Default)]
pub struct OutputScanner {
    pending: String,
}

impl OutputScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one raw chunk into ordered actions.
    pub fn push(&mut self, chunk: &str) -> Vec<StreamAction> {
        let mut actions = Vec::new();
        let mut rest = chunk;
        if self.pending.is_empty() {
            if let Some(stripped) = rest.strip_prefix(FORM_FEED) {
                actions.push(StreamAction::Clear);
                rest = stripped;
            }
        }
        self.pending.push_str(rest);
        self.drain(&mut actions);
        actions
    }

    /// Flush whatever remains once the stream has ended.
    pub fn finish(&mut self) -> Vec<StreamAction> {
        let mut actions = Vec::new();
        self.drain(&mut actions);
        let tail = std::mem::take(&mut self.pending);
        if !tail.is_empty() {
            match classify_line(tail.trim_end_matches('\r')) {
                Some(action) => actions.push(action),
                None => actions.push(StreamAction::Output(tail)),
            }
        }
        actions
    }

    fn drain(&mut self, actions: &mut Vec<StreamAction>) {
        let mut out = String::new();
        while let Some(nl) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=nl).collect();
            let body = line.trim_end_matches('\n').trim_end_matches('\r');
            match classify_line(body) {
                Some(action) => {
                    flush(&mut out, actions);
                    actions.push(action);
                }
                None => out.push_str(&line),
            }
        }
        if !self.pending.is_empty() && !viable_marker_prefix(&self.pending) {
            out.push_str(&self.pending);
            self.pending.clear();
        }
        flush(&mut out, actions);
    }
}

fn flush(out: &mut String, actions: &mut Vec<StreamAction>) {
    if !out.is_empty() {
        actions.push(StreamAction::Output(std::mem::take(out)));
    }
}

/// Classify a complete line; `None` means plain output.
fn classify_line(line: &str) -> Option<StreamAction> {
    if line == CLEAR_TAG {
        return Some(StreamAction::Clear);
    }
    let rest = line.strip_prefix(INPUT_TAG)?.trim();
    if rest.is_empty() {
        return Some(StreamAction::Input(None));
    }
    let prompt = rest.strip_prefix("->")?;
    Some(StreamAction::Input(Some(prompt.trim().to_string())))
}

/// Could `tail` still become a marker line once more bytes arrive?
fn viable_marker_prefix(tail: &str) -> bool {
    tail.starts_with(INPUT_TAG) || INPUT_TAG.starts_with(tail) || CLEAR_TAG.starts_with(tail)
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
