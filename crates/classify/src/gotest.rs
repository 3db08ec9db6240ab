// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Go-test transcript classifier

use cb_core::{StdTestResult, TestResult, TestStatus};

const RUN_PREFIX: &str = "=== RUN";
const PASS_PREFIX: &str = "--- PASS:";
const FAIL_PREFIX: &str = "--- FAIL:";
const FAIL_INFO_PREFIX: &str = "FAIL";

/// Parses a `go test -v`-style transcript into a hierarchical test tree.
///
/// When the environment's own result envelope already reports the overall
/// verdict and failure count, supply them — they are authoritative and no
/// recomputation happens.
pub struct GoTestClassifier<'a> {
    transcript: &'a str,
    passed: Option<bool>,
    tests_failed: Option<u32>,
}

impl<'a> GoTestClassifier<'a> {
    pub fn new(transcript: &'a str) -> Self {
        Self { transcript, passed: None, tests_failed: None }
    }

    /// Pre-known overall verdict.
    pub fn passed(mut self, passed: Option<bool>) -> Self {
        self.passed = passed;
        self
    }

    /// Pre-known failure count.
    pub fn tests_failed(mut self, count: Option<u32>) -> Self {
        self.tests_failed = count;
        self
    }

    pub fn classify(self) -> StdTestResult {
        let mut result = StdTestResult {
            result_status: if self.passed == Some(true) { TestStatus::Pass } else { TestStatus::Fail },
            tests_failed: self.tests_failed,
            tests: Vec::new(),
        };

        // Additional-info lines attach to the most recently *created* node,
        // not the most recently matched one.
        let mut last_created: Option<Vec<String>> = None;
        let mut fail_count: u32 = 0;

        for raw in self.transcript.lines() {
            let line = raw.trim();

            // Bare summary marker; no node effect.
            if line.starts_with(FAIL_INFO_PREFIX) {
                continue;
            }

            if let Some(rest) = line.strip_prefix(RUN_PREFIX) {
                let names: Vec<&str> = rest.trim().split('/').collect();
                if let Some(created) = walk_create(&mut result.tests, &names) {
                    last_created = Some(created);
                }
                continue;
            }

            let is_pass = line.starts_with(PASS_PREFIX);
            let is_fail = line.starts_with(FAIL_PREFIX);
            if is_pass || is_fail {
                if self.tests_failed.is_none() && is_fail {
                    fail_count += 1;
                }

                // After the last ':' the line reads ` Name/Sub (0.01s)`.
                let check: Vec<&str> = match line.rsplit_once(':') {
                    Some((_, rest)) => rest.trim().split(' ').collect(),
                    None => continue,
                };
                if check.len() != 2 {
                    continue;
                }
                let names: Vec<&str> = check[0].split('/').collect();
                // Unmatched result lines are dropped, not errors.
                if let Some(node) = find_node(&mut result.tests, &names) {
                    node.status = if is_pass { TestStatus::Pass } else { TestStatus::Fail };
                    node.time = parse_time_ms(check[1]);
                }
                continue;
            }

            if line.is_empty() {
                continue;
            }

            // Assertion output, stack traces and the like.
            if let Some(path) = &last_created {
                let names: Vec<&str> = path.iter().map(String::as_str).collect();
                if let Some(node) = find_node(&mut result.tests, &names) {
                    node.msg.get_or_insert_with(String::new).push_str(line);
                }
            }
        }

        if self.tests_failed.is_none() {
            result.tests_failed = Some(fail_count);
        }
        if self.passed.is_none() {
            result.result_status = if result.tests_failed.unwrap_or(0) > 0 {
                TestStatus::Fail
            } else {
                TestStatus::Pass
            };
        }

        result
    }
}

/// Walk `/`-segmented path components, creating missing nodes (default
/// status `Fail`). Sibling subtests reuse their shared parent node. Returns
/// the path of the deepest node created, if any.
fn walk_create(mut level: &mut Vec<TestResult>, names: &[&str]) -> Option<Vec<String>> {
    let mut last_created = None;
    for (i, name) in names.iter().enumerate() {
        let pos = match level.iter().position(|t| t.name == *name) {
            Some(pos) => pos,
            None => {
                level.push(TestResult::new(*name));
                last_created = Some(names[..=i].iter().map(|s| s.to_string()).collect());
                level.len() - 1
            }
        };
        level = &mut level[pos].children;
    }
    last_created
}

/// Locate an existing node by path; `None` when any segment is missing.
fn find_node<'t>(mut level: &'t mut Vec<TestResult>, names: &[&str]) -> Option<&'t mut TestResult> {
    for (i, name) in names.iter().enumerate() {
        let pos = level.iter().position(|t| t.name == *name)?;
        if i + 1 == names.len() {
            return Some(&mut level[pos]);
        }
        level = &mut level[pos].children;
    }
    None
}

/// `(1.23s)` → `1230`; fractional milliseconds truncate, not round.
fn parse_time_ms(token: &str) -> Option<u64> {
    let secs: f64 = token.strip_prefix('(')?.strip_suffix("s)")?.parse().ok()?;
    if secs.is_sign_negative() {
        return None;
    }
    Some((secs * 1000.0).trunc() as u64)
}

#[cfg(test)]
#[path = "gotest_tests.rs"]
mod tests;
