// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared [`ExecHandler`] implementations for controllers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cb_core::OutputSink;
use cb_exec::{ExecError, ExecHandler};
use parking_lot::Mutex;

use crate::execution::{Execution, InputProvider};

/// Streams process output straight into the execution's sink: stdout as
/// text items, stderr as error items, clears and input prompts forwarded.
pub struct SinkHandler {
    sink: OutputSink,
    input: Option<Arc<dyn InputProvider>>,
    saw_error: AtomicBool,
    canceled: AtomicBool,
}

impl SinkHandler {
    pub fn new(ex: &Execution) -> Self {
        Self {
            sink: ex.sink().clone(),
            input: ex.input_provider(),
            saw_error: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
        }
    }

    pub fn saw_error(&self) -> bool {
        self.saw_error.load(Ordering::SeqCst)
    }

    pub fn was_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecHandler for SinkHandler {
    async fn output(&self, chunk: &str) {
        self.sink.append_text(chunk);
    }

    async fn error(&self, err: ExecError) {
        self.saw_error.store(true, Ordering::SeqCst);
        self.sink.append_error(err.to_string());
    }

    async fn canceled(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    async fn input(&self, prompt: Option<&str>) -> Option<String> {
        match &self.input {
            Some(provider) => provider.request(prompt).await,
            None => None,
        }
    }

    async fn clear(&self) {
        self.sink.clear();
    }
}

/// Accumulates a run for post-processing by a classifier. Stderr content is
/// kept apart from hard execution errors (spawn/stream failures): the
/// former may still belong to a successful test run, the latter never do.
#[derive(Default)]
pub struct CollectHandler {
    output: Mutex<String>,
    stderr: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
    canceled: AtomicBool,
}

impl CollectHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    /// Stderr content the process wrote.
    pub fn stderr(&self) -> Vec<String> {
        self.stderr.lock().clone()
    }

    /// Spawn or stream failures — the run never properly happened.
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().clone()
    }

    pub fn was_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecHandler for CollectHandler {
    async fn output(&self, chunk: &str) {
        self.output.lock().push_str(chunk);
    }

    async fn error(&self, err: ExecError) {
        match err {
            ExecError::Stderr(text) => self.stderr.lock().push(text),
            other => self.failures.lock().push(other.to_string()),
        }
    }

    async fn canceled(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }
}
