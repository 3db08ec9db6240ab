// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line tokenization and placeholder substitution

use crate::error::ExecError;

/// Split a command string into words.
///
/// Quote-aware: single and double quotes group words and are stripped; a
/// backslash escapes the next character outside single quotes. No variable
/// or glob expansion — this tokenizes, nothing more.
pub fn split_command(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    // A quoted empty word ("" / '') still counts as a word.
    let mut word_started = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                word_started = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    word.push(q);
                }
            }
            '"' => {
                word_started = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => {
                            if let Some(esc) = chars.next() {
                                word.push(esc);
                            }
                        }
                        _ => word.push(q),
                    }
                }
            }
            '\\' => {
                word_started = true;
                if let Some(esc) = chars.next() {
                    word.push(esc);
                }
            }
            c if c.is_whitespace() => {
                if word_started {
                    words.push(std::mem::take(&mut word));
                    word_started = false;
                }
            }
            _ => {
                word_started = true;
                word.push(c);
            }
        }
    }
    if word_started {
        words.push(word);
    }

    words
}

/// A resolved shell invocation: program plus argument vector.
///
/// Placeholder substitution is textual-token-exact — no shell escaping is
/// applied beyond what the caller constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    words: Vec<String>,
}

impl CommandLine {
    pub fn parse(input: &str) -> Result<Self, ExecError> {
        let words = split_command(input);
        if words.is_empty() {
            return Err(ExecError::EmptyCommand);
        }
        Ok(Self { words })
    }

    pub fn program(&self) -> &str {
        &self.words[0]
    }

    pub fn args(&self) -> &[String] {
        &self.words[1..]
    }

    /// Replace every word exactly equal to `token` with `value`.
    ///
    /// The replacement value stays one word regardless of its content, so a
    /// path with spaces or a whole SQL script survives as a single argument.
    pub fn replace_token(mut self, token: &str, value: &str) -> Self {
        for word in &mut self.words {
            if word == token {
                *word = value.to_string();
            }
        }
        self
    }

    /// Append one word to the argument vector.
    pub fn arg(mut self, value: &str) -> Self {
        self.words.push(value.to_string());
        self
    }

    /// Replace occurrences of `token` inside words (for composite
    /// placeholders like `{pkg}{class}` sharing one argument).
    pub fn substitute(mut self, token: &str, value: &str) -> Self {
        for word in &mut self.words {
            if word.contains(token) {
                *word = word.replace(token, value);
            }
        }
        self
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
