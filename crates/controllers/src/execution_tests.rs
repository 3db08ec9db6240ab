// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use cb_core::{Cell, Notebook};
use tokio_util::sync::CancellationToken;

use super::*;

fn execution(cell: Cell, notebook: Notebook) -> Execution {
    Execution::new(cell, 0, Arc::new(notebook), CancellationToken::new())
}

#[test]
fn command_template_prefers_cell_then_notebook_then_default() {
    let notebook = Notebook::default().with_meta("execution", "from-notebook {xprog}");

    let ex = execution(Cell::code("go", ""), notebook.clone());
    assert_eq!(ex.command_template("default {xprog}"), "from-notebook {xprog}");

    let cell = Cell::code("go", "").with_meta("execution", "  from-cell {xprog}  ");
    let ex = execution(cell, notebook);
    assert_eq!(ex.command_template("default {xprog}"), "from-cell {xprog}");

    let ex = execution(Cell::code("go", ""), Notebook::default());
    assert_eq!(ex.command_template("default {xprog}"), "default {xprog}");
}

#[test]
fn outputs_snapshot_preserves_order_across_clear() {
    let ex = execution(Cell::code("python", ""), Notebook::default());
    ex.append_text_output("a");
    ex.clear_output();
    ex.append_text_output("b");
    ex.append_error_output("c");

    let outputs = ex.outputs();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].as_text(), Some("b"));
    assert!(outputs[1].is_error());
}

#[test]
fn cancellation_is_observable() {
    let cancel = CancellationToken::new();
    let ex = Execution::new(Cell::code("go", ""), 3, Arc::new(Notebook::default()), cancel.clone());
    assert!(!ex.is_canceled());
    cancel.cancel();
    assert!(ex.is_canceled());
    assert_eq!(ex.cell_index(), 3);
}
