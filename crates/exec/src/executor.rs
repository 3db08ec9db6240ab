// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning, stream consumption and cancellation

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};
use tokio_util::sync::CancellationToken;

use crate::command::CommandLine;
use crate::error::ExecError;
use crate::handler::ExecHandler;
use crate::stream::{OutputScanner, StreamAction};

const READ_CHUNK_SIZE: usize = 8192;
/// Bound on draining already-written stderr after a cancellation, so a
/// SIGINT-ignoring child cannot wedge the executor.
const STDERR_DRAIN_MAX: Duration = Duration::from_millis(500);
/// Bound on reaping the child once streams have settled.
const REAP_MAX: Duration = Duration::from_secs(5);

/// Runs one external command, streaming its output to an [`ExecHandler`].
///
/// The command string is tokenized up front; environment overrides are
/// merged over the inherited environment at spawn time. All failures are
/// reported through the handler's `error` channel — `execute` itself never
/// returns one.
pub struct ProcessExecutor {
    command: CommandLine,
    env: Vec<(String, String)>,
}

impl ProcessExecutor {
    pub fn new(command: &str) -> Result<Self, ExecError> {
        Ok(Self::from_command(CommandLine::parse(command)?))
    }

    pub fn from_command(command: CommandLine) -> Self {
        Self { command, env: Vec::new() }
    }

    /// Exact-token placeholder replacement on the argument vector.
    pub fn replace_token(mut self, token: &str, value: &str) -> Self {
        self.command = self.command.replace_token(token, value);
        self
    }

    /// Add an environment override (merged over the inherited environment).
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Run to completion or cancellation.
    ///
    /// Settles when both stdout and stderr have ended naturally, or when the
    /// cancellation signal fires — whichever happens first. Only a
    /// cancellation produces a `canceled()` call; stderr that the process
    /// already wrote still surfaces through `error()` either way.
    pub async fn execute(&self, handler: &dyn ExecHandler, cancel: &CancellationToken) {
        let program = self.command.program().to_string();
        tracing::debug!(cmd = %self.command, "spawning process");

        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(self.command.args());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                let err = if source.kind() == std::io::ErrorKind::NotFound {
                    ExecError::MissingExecutable(program)
                } else {
                    ExecError::Spawn { program, source }
                };
                handler.error(err).await;
                return;
            }
        };

        let mut stdin = child.stdin.take();
        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            // Unreachable with piped stdio; settle rather than hang.
            let _ = child.start_kill();
            return;
        };

        let mut scanner = OutputScanner::new();
        let mut out_buf = [0u8; READ_CHUNK_SIZE];
        let mut err_buf = [0u8; READ_CHUNK_SIZE];
        let mut out_done = false;
        let mut err_done = false;
        let mut was_canceled = false;

        while !(out_done && err_done) {
            tokio::select! {
                // Checked first so a pending cancellation always wins over a
                // simultaneously readable chunk.
                biased;

                _ = cancel.cancelled() => {
                    was_canceled = true;
                    interrupt(&mut child);
                    break;
                }

                read = stdout.read(&mut out_buf), if !out_done => match read {
                    Ok(0) => out_done = true,
                    Ok(n) => {
                        let text = String::from_utf8_lossy(&out_buf[..n]).into_owned();
                        for action in scanner.push(&text) {
                            dispatch(action, handler, &mut stdin).await;
                        }
                    }
                    Err(e) => {
                        out_done = true;
                        handler.error(ExecError::Io(e)).await;
                    }
                },

                read = stderr.read(&mut err_buf), if !err_done => match read {
                    Ok(0) => err_done = true,
                    Ok(n) => {
                        let text = String::from_utf8_lossy(&err_buf[..n]).into_owned();
                        handler.error(ExecError::Stderr(text)).await;
                    }
                    Err(e) => {
                        err_done = true;
                        handler.error(ExecError::Io(e)).await;
                    }
                },
            }
        }

        if was_canceled {
            // Stale stdout is dropped past the cancellation point, but
            // stderr the process managed to write still surfaces.
            let drain = async {
                loop {
                    match stderr.read(&mut err_buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            let text = String::from_utf8_lossy(&err_buf[..n]).into_owned();
                            handler.error(ExecError::Stderr(text)).await;
                        }
                    }
                }
            };
            if tokio::time::timeout(STDERR_DRAIN_MAX, drain).await.is_err() {
                let _ = child.start_kill();
            }
        } else {
            for action in scanner.finish() {
                dispatch(action, handler, &mut stdin).await;
            }
        }

        if tokio::time::timeout(REAP_MAX, child.wait()).await.is_err() {
            let _ = child.start_kill();
            let _ = child.wait().await;
        }

        if was_canceled {
            tracing::debug!(cmd = %self.command, "process canceled");
            handler.canceled().await;
        }
    }
}

async fn dispatch(action: StreamAction, handler: &dyn ExecHandler, stdin: &mut Option<ChildStdin>) {
    match action {
        StreamAction::Output(text) => handler.output(&text).await,
        StreamAction::Clear => handler.clear().await,
        StreamAction::Input(prompt) => {
            let reply = handler.input(prompt.as_deref()).await;
            if let (Some(reply), Some(stdin)) = (reply, stdin.as_mut()) {
                let _ = stdin.write_all(reply.as_bytes()).await;
                let _ = stdin.write_all(b"\n").await;
                let _ = stdin.flush().await;
            }
        }
    }
}

/// Default cancellation signal is an interrupt; SIGKILL only as fallback.
#[cfg(unix)]
fn interrupt(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if kill(Pid::from_raw(pid as i32), Signal::SIGINT).is_ok() {
            return;
        }
    }
    let _ = child.start_kill();
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) {
    let _ = child.start_kill();
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
