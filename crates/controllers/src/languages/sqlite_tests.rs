// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exercised against a real sqlite3 client when one is installed.

use std::sync::Arc;

use cb_core::{Cell, Notebook, Outcome};
use tokio_util::sync::CancellationToken;

use super::*;

fn sqlite_missing() -> bool {
    which::which("sqlite3").is_err()
}

async fn run(sql: &str) -> (Outcome, Vec<cb_core::OutputItem>) {
    let ex = Execution::new(
        Cell::code("sql", sql),
        0,
        Arc::new(Notebook::default()),
        CancellationToken::new(),
    );
    let outcome = SqliteController::new().execute(&ex).await.unwrap();
    (outcome, ex.outputs())
}

#[tokio::test]
async fn select_output_classifies_into_a_table_payload() {
    if sqlite_missing() {
        return;
    }
    let (outcome, outputs) =
        run("create table t (id integer, name text); insert into t values (1, 'ada'); select * from t;")
            .await;
    assert_eq!(outcome, Outcome::Success);

    let table = outputs
        .iter()
        .find_map(|o| match o {
            cb_core::OutputItem::Json { value, mime, .. } => Some((value, mime)),
            _ => None,
        })
        .expect("query output should classify into a table");
    assert_eq!(table.1.as_deref(), Some("application/cellbook.sql.table"));
    assert_eq!(table.0["columns"], serde_json::json!(["id", "name"]));
    assert_eq!(table.0["rows"]["name"], serde_json::json!(["ada"]));
}

#[tokio::test]
async fn sql_errors_fail_the_run() {
    if sqlite_missing() {
        return;
    }
    let (outcome, outputs) = run("select definitely not sql;").await;
    assert_eq!(outcome, Outcome::Failure);
    assert!(outputs.iter().any(|o| o.is_error()));
}

#[tokio::test]
async fn statements_without_result_sets_succeed_quietly() {
    if sqlite_missing() {
        return;
    }
    let (outcome, outputs) = run("create table t (id integer);").await;
    assert_eq!(outcome, Outcome::Success);
    assert!(outputs.is_empty());
}
