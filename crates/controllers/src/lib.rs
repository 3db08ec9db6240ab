// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cb-controllers: the language controller contract, registry and plugins
//!
//! A controller turns one cell's content into a runnable artifact — an
//! external process, a remote compile call, or an in-process interpreter
//! run — and reports a tri-state outcome plus structured outputs. The
//! registry owns the active controller set, dispatches executions, and
//! wraps them with the per-cell script hook.

pub mod checks;
pub mod controller;
pub mod error;
pub mod execution;
pub mod handlers;
pub mod hook;
pub mod languages;
pub mod notify;
pub mod registry;
pub mod temp;

pub use checks::{CheckReport, CheckStatus, CompatibilityChecker, ExecutableCheck, KernelCheck};
pub use controller::{Controller, ControllerInfo, OnControllerInfo};
pub use error::ControllerError;
pub use execution::{Execution, InputProvider};
pub use hook::CellScriptHook;
pub use notify::{Notifier, TracingNotifier};
pub use registry::{CellRun, KernelConfig, Registry};
pub use temp::TempArtifact;
