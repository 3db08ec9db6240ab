// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use cb_core::{Cell, Notebook};
use tokio_util::sync::CancellationToken;

use super::*;

#[tokio::test]
async fn missing_db_name_is_an_error_before_anything_runs() {
    let ex = Execution::new(
        Cell::code("sql", "select 1;"),
        0,
        Arc::new(Notebook::default()),
        CancellationToken::new(),
    );
    let err = MySqlController::new().execute(&ex).await.unwrap_err();
    assert!(err.to_string().contains("db-name"));
}

#[tokio::test]
async fn db_name_from_notebook_metadata_is_accepted() {
    // No mysql server in the test environment: the point is only that
    // resolution got past the metadata gate and reached the client.
    let notebook = Notebook::default()
        .with_meta("db-name", "testdb")
        .with_meta("db-host", "127.0.0.1")
        .with_meta("db-port", "1");
    let ex = Execution::new(
        Cell::code("sql", "select 1;"),
        0,
        Arc::new(notebook),
        CancellationToken::new(),
    );
    let outcome = MySqlController::new().execute(&ex).await.unwrap();
    // Either the client is missing or the connection fails — both are
    // run-level failures, not metadata errors.
    assert_eq!(outcome, cb_core::Outcome::Failure);
    assert!(ex.outputs().iter().any(|o| o.is_error()));
}

#[test]
fn notebook_metadata_descriptions_mention_the_cell_override() {
    let controller = MySqlController::new();
    let fields = controller.notebook_metadata();
    assert_eq!(fields.len(), 5);
    assert!(fields
        .iter()
        .all(|f| f.description.as_deref().unwrap_or_default().contains("overwritten")));
}
