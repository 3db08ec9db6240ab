// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-notification seam
//!
//! Hook-script problems are reported, never raised: they must not fail the
//! cell's own execution. The host installs its own notifier to surface
//! messages in its UI; the default just logs.

pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
