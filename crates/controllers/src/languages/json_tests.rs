// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use cb_core::{Cell, Notebook, Outcome, OutputItem};
use tokio_util::sync::CancellationToken;

use super::*;

async fn run(content: &str) -> (Outcome, Vec<OutputItem>) {
    let ex = Execution::new(
        Cell::code("json", content),
        0,
        Arc::new(Notebook::default()),
        CancellationToken::new(),
    );
    let outcome = JsonController.execute(&ex).await.unwrap();
    (outcome, ex.outputs())
}

#[tokio::test]
async fn valid_json_is_emitted_as_a_json_output() {
    let (outcome, outputs) = run(r#"{"a": [1, 2], "b": null}"#).await;
    assert_eq!(outcome, Outcome::Success);
    match &outputs[0] {
        OutputItem::Json { value, .. } => assert_eq!(value["a"][1], serde_json::json!(2)),
        other => panic!("expected json output, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_reports_the_position() {
    let (outcome, outputs) = run("{\n  \"a\": oops\n}").await;
    assert_eq!(outcome, Outcome::Failure);
    match &outputs[0] {
        OutputItem::Error { message, .. } => assert!(message.starts_with("[2;")),
        other => panic!("expected error output, got {other:?}"),
    }
}
