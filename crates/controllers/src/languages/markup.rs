// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown and dynamic-HTML display controllers

use std::sync::LazyLock;

use async_trait::async_trait;
use cb_core::{meta, mime, Contributor, Metadata, MetadataField, Outcome};
use regex::Regex;

use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;

const LINK_IMPORT: &str = "link://";
const SCRIPT_IMPORT: &str = "script://";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("constant regex pattern is valid"));

/// Emits markdown content for the markdown renderer. Markup cells never
/// fail.
pub struct MarkdownController;

#[async_trait]
impl Controller for MarkdownController {
    fn id(&self) -> &str {
        "md-basic"
    }

    fn label(&self) -> &str {
        "Markdown Basic"
    }

    fn supported_languages(&self) -> &[&str] {
        &["markdown"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Display markdown")
    }

    fn description(&self) -> Option<&str> {
        Some("Interpreting and displaying markdown text")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        ex.append_text_with(ex.cell().content.clone(), Some(mime::MARKDOWN_EXT), None);
        Ok(Outcome::Success)
    }
}

impl OnControllerInfo for MarkdownController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("md-basic.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("md-basic.md")
    }
}

/// Emits HTML pages for the frame renderer, resolving `<!-- link://ID -->`
/// and `<!-- script://ID -->` comment imports from sibling cells (matched
/// by `id` metadata, language-checked, inlined as `<style>`/`<script>`).
/// `css` cells are building blocks only and resolve indeterminate.
pub struct HtmlController;

impl HtmlController {
    pub fn new() -> Self {
        Self
    }

    /// Replace comment imports with inlined sibling content. Every
    /// unresolvable import is reported; any error fails the cell.
    fn replace_imports(ex: &Execution, content: &str) -> (String, Vec<String>) {
        let mut resolved = content.to_string();
        let mut errors = Vec::new();

        for capture in COMMENT_PATTERN.captures_iter(content) {
            let comment = &capture[0];
            let body = capture[1].trim();

            let (cell_id, tag, expected_lang) = if let Some(id) = body.strip_prefix(LINK_IMPORT) {
                (id, "style", "css")
            } else if let Some(id) = body.strip_prefix(SCRIPT_IMPORT) {
                (id, "script", "javascript")
            } else {
                continue;
            };

            let Some(cell) = ex.notebook().find_by_meta(meta::CELL_ID, cell_id) else {
                errors.push(format!("Could not find cell by Id: {cell_id}"));
                continue;
            };
            if cell.language_id != expected_lang {
                errors.push(format!(
                    "Cell {cell_id} has '{}' language Id, but expected: '{expected_lang}'",
                    cell.language_id
                ));
                continue;
            }

            let node = format!("<{tag}>{}</{tag}>", cell.content);
            resolved = resolved.replacen(comment, &node, 1);
        }

        (resolved, errors)
    }

    /// Frame-size hints from cell metadata, when present.
    fn frame_metadata(ex: &Execution) -> Option<Metadata> {
        let cell = ex.cell();
        let mut frame = Metadata::new();
        if let Some(width) = cell.meta_str(meta::FRAME_WIDTH) {
            frame.insert(meta::FRAME_WIDTH.to_string(), width.into());
        }
        if let Some(height) = cell.meta_str(meta::FRAME_HEIGHT) {
            frame.insert(meta::FRAME_HEIGHT.to_string(), height.into());
        }
        if frame.is_empty() {
            None
        } else {
            Some(frame)
        }
    }
}

impl Default for HtmlController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for HtmlController {
    fn id(&self) -> &str {
        "dhtml"
    }

    fn label(&self) -> &str {
        "DHTML"
    }

    fn supported_languages(&self) -> &[&str] {
        &["html", "css"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Display html page with dynamic content")
    }

    fn description(&self) -> Option<&str> {
        Some("Supports CSS imports from sibling cells")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        if ex.cell().language_id == "css" {
            return Ok(Outcome::Canceled);
        }

        let (content, errors) = Self::replace_imports(ex, &ex.cell().content);
        if !errors.is_empty() {
            for error in errors {
                ex.append_error_output(error);
            }
            return Ok(Outcome::Failure);
        }

        ex.append_text_with(content, Some(mime::HTML), Self::frame_metadata(ex));
        Ok(Outcome::Success)
    }
}

impl OnControllerInfo for HtmlController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("dhtml.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("dhtml.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        vec![
            MetadataField::new(meta::CELL_ID).description("id of the cell"),
            MetadataField::new(meta::FRAME_WIDTH)
                .description("width of the output frame")
                .default_value("100%"),
            MetadataField::new(meta::FRAME_HEIGHT)
                .description("height of the output frame")
                .default_value("auto"),
        ]
    }
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
