// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kernel compatibility checks

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::handlers::CollectHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Warn,
    Fail,
}

/// Outcome of one environment probe, with a human-readable explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Success, message: message.into() }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Warn, message: message.into() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Fail, message: message.into() }
    }
}

/// One named asynchronous environment probe. Each check is independently
/// cancelable through the same signal contract as executions.
#[async_trait]
pub trait KernelCheck: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, cancel: &CancellationToken) -> CheckReport;
}

/// Capability interface: a controller's environment requirements.
pub trait CompatibilityChecker: Send + Sync {
    fn requirements(&self) -> Vec<Arc<dyn KernelCheck>>;
}

/// Probes that a program is on PATH and, when version arguments are given,
/// captures its version banner.
pub struct ExecutableCheck {
    name: String,
    program: String,
    version_args: Vec<String>,
}

impl ExecutableCheck {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self { name: name.into(), program: program.into(), version_args: Vec::new() }
    }

    pub fn version_args(mut self, args: &[&str]) -> Self {
        self.version_args = args.iter().map(|a| a.to_string()).collect();
        self
    }
}

#[async_trait]
impl KernelCheck for ExecutableCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, cancel: &CancellationToken) -> CheckReport {
        let path = match which::which(&self.program) {
            Ok(path) => path,
            Err(_) => {
                return CheckReport::fail(format!(
                    "could not find '{}' on PATH",
                    self.program
                ));
            }
        };
        if self.version_args.is_empty() {
            return CheckReport::success(format!("'{}' found at {}", self.program, path.display()));
        }

        let command = format!("{} {}", self.program, self.version_args.join(" "));
        let collector = CollectHandler::new();
        match cb_exec::ProcessExecutor::new(&command) {
            Ok(executor) => executor.execute(&collector, cancel).await,
            Err(e) => return CheckReport::fail(e.to_string()),
        }
        if collector.was_canceled() || cancel.is_cancelled() {
            return CheckReport::warn("check canceled");
        }

        let output = collector.output();
        match output.lines().find(|l| !l.trim().is_empty()) {
            Some(version) => CheckReport::success(format!(
                "'{}' found at {}\n\n> {}",
                self.program,
                path.display(),
                version.trim()
            )),
            None => CheckReport::warn(format!(
                "'{}' found at {}, but its version could not be determined",
                self.program,
                path.display()
            )),
        }
    }
}

/// A fixed requirement list, shared by the local toolchain controllers.
#[derive(Default)]
pub struct ExecutableCompatibility {
    checks: Vec<Arc<dyn KernelCheck>>,
}

impl ExecutableCompatibility {
    pub fn new(checks: Vec<Arc<dyn KernelCheck>>) -> Self {
        Self { checks }
    }
}

impl CompatibilityChecker for ExecutableCompatibility {
    fn requirements(&self) -> Vec<Arc<dyn KernelCheck>> {
        self.checks.clone()
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
