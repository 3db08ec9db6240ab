// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cb-exec: process execution with streamed output and cancellation
//!
//! Runs a single external command to completion or cancellation, pushing
//! stdout/stderr to a caller-supplied [`ExecHandler`] as they arrive. Text
//! chunks are scanned for the in-stream control protocol (interactive input
//! prompts and clear markers) before they reach the handler.

pub mod command;
pub mod error;
pub mod executor;
pub mod handler;
pub mod stream;

pub use command::{split_command, CommandLine};
pub use error::ExecError;
pub use executor::ProcessExecutor;
pub use handler::ExecHandler;
pub use stream::{OutputScanner, StreamAction, CLEAR_TAG, INPUT_TAG};
