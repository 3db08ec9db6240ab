// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller registry and execution dispatch

use std::collections::HashSet;
use std::sync::Arc;

use cb_core::{Cell, Notebook, Outcome, OutputItem};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::controller::{Controller, ControllerInfo};
use crate::hook::CellScriptHook;
use crate::notify::{Notifier, TracingNotifier};

/// Host configuration entry for one controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelConfig {
    #[serde(rename = "kernelType")]
    pub kernel_type: String,
    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,
}

/// The sealed result of one cell run.
#[derive(Debug)]
pub struct CellRun {
    pub outcome: Outcome,
    pub outputs: Vec<OutputItem>,
}

#[derive(Default)]
struct Inner {
    controllers: Vec<Arc<dyn Controller>>,
    disabled: HashSet<String>,
}

/// Owns the active controller set with an explicit lifecycle: `register`,
/// `unregister`, `reconfigure`. No ambient global state — the host process
/// owns the registry instance.
///
/// Concurrent `run_cell` calls are independent; each owns its execution,
/// temp artifacts and output sink exclusively.
pub struct Registry {
    inner: RwLock<Inner>,
    notifier: Arc<dyn Notifier>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(TracingNotifier))
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: RwLock::new(Inner::default()), notifier }
    }

    /// Register a controller, enabled. A controller with the same id is
    /// replaced (latest wins).
    pub fn register(&self, controller: Arc<dyn Controller>) {
        let mut inner = self.inner.write();
        let id = controller.id().to_string();
        inner.controllers.retain(|c| c.id() != id);
        inner.controllers.push(controller);
        inner.disabled.remove(&id);
    }

    /// Remove a controller entirely. Returns whether one was removed.
    pub fn unregister(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        let before = inner.controllers.len();
        inner.controllers.retain(|c| c.id() != id);
        inner.disabled.remove(id);
        inner.controllers.len() != before
    }

    /// Diff-and-apply enable/disable state from host configuration without
    /// re-registering anything. Entries naming unknown controllers are
    /// ignored; controllers absent from the list keep their current state.
    pub fn reconfigure(&self, configs: &[KernelConfig]) {
        let mut inner = self.inner.write();
        for config in configs {
            let known = inner.controllers.iter().any(|c| c.id() == config.kernel_type);
            if !known {
                continue;
            }
            if config.is_enabled {
                inner.disabled.remove(&config.kernel_type);
            } else {
                inner.disabled.insert(config.kernel_type.clone());
            }
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        let inner = self.inner.read();
        inner.controllers.iter().any(|c| c.id() == id) && !inner.disabled.contains(id)
    }

    pub fn controller_ids(&self) -> Vec<String> {
        self.inner.read().controllers.iter().map(|c| c.id().to_string()).collect()
    }

    pub fn controller_by_id(&self, id: &str) -> Option<Arc<dyn Controller>> {
        self.inner.read().controllers.iter().find(|c| c.id() == id).cloned()
    }

    /// First enabled controller accepting `language_id`, in registration
    /// order.
    pub fn controller_for_language(&self, language_id: &str) -> Option<Arc<dyn Controller>> {
        let inner = self.inner.read();
        inner
            .controllers
            .iter()
            .find(|c| {
                !inner.disabled.contains(c.id())
                    && c.supported_languages().contains(&language_id)
            })
            .cloned()
    }

    /// Assembled pass-through details for one controller.
    pub fn controller_info(&self, id: &str) -> Option<ControllerInfo> {
        self.controller_by_id(id).map(|c| ControllerInfo::from_controller(c.as_ref()))
    }

    /// Run one cell to a sealed [`CellRun`].
    ///
    /// The cell script hook wraps the controller call; controller errors
    /// are converted into an error output plus a failed outcome here —
    /// nothing escapes to the host and the execution never stays pending.
    pub async fn run_cell(
        &self,
        cell: Cell,
        cell_index: usize,
        notebook: Arc<Notebook>,
        cancel: CancellationToken,
    ) -> CellRun {
        let controller = self.controller_for_language(&cell.language_id);
        let ex = crate::execution::Execution::new(cell, cell_index, notebook, cancel);

        let hook = match CellScriptHook::from_cell(ex.cell()) {
            Ok(hook) => hook,
            Err(e) => {
                self.notifier.warn(&format!("cell script error: {e}"));
                None
            }
        };
        if let Some(hook) = &hook {
            if let Err(e) = hook.before(&ex) {
                self.notifier.warn(&format!("cell script 'before' error: {e}"));
            }
        }

        let outcome = match controller {
            Some(controller) => {
                tracing::debug!(controller = controller.id(), index = ex.cell_index(), "running cell");
                match controller.execute(&ex).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        ex.append_error_output(e.to_string());
                        Outcome::Failure
                    }
                }
            }
            None => {
                ex.append_error_output(format!(
                    "no enabled controller supports language '{}'",
                    ex.cell().language_id
                ));
                Outcome::Failure
            }
        };

        if let Some(hook) = &hook {
            if let Err(e) = hook.after(&ex, outcome) {
                self.notifier.warn(&format!("cell script 'after' error: {e}"));
            }
        }

        CellRun { outcome, outputs: ex.outputs() }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
