// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use cb_core::{Cell, Notebook, Outcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::*;

fn execution(cell: Cell, notebook: Notebook) -> Execution {
    Execution::new(cell, 0, Arc::new(notebook), CancellationToken::new())
}

/// One-shot HTTP stub returning a canned JSON body.
async fn serve_once(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}/compile")
}

#[tokio::test]
async fn stdout_events_become_text_outputs() {
    let url = serve_once(
        r#"{"Errors":"","Events":[{"Message":"hello\n","Kind":"stdout","Delay":0}],"Status":0}"#,
    )
    .await;
    let notebook = Notebook::default().with_meta("play-url", url);
    let ex = execution(Cell::code("go", "package main"), notebook);

    let outcome = GoPlaygroundController::new().execute(&ex).await.unwrap();
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(ex.outputs()[0].as_text(), Some("hello\n"));
}

#[tokio::test]
async fn compile_errors_fail_without_replaying_events() {
    let url = serve_once(r#"{"Errors":"prog.go:2: undefined: fmt","Status":1}"#).await;
    let notebook = Notebook::default().with_meta("play-url", url);
    let ex = execution(Cell::code("go", "package main"), notebook);

    let outcome = GoPlaygroundController::new().execute(&ex).await.unwrap();
    assert_eq!(outcome, Outcome::Failure);
    assert!(ex.outputs()[0].is_error());
}

#[tokio::test]
async fn test_envelopes_use_the_authoritative_verdict() {
    let url = serve_once(
        r#"{"IsTest":true,"TestsFailed":0,"Status":0,"Events":[{"Message":"=== RUN TestA\n--- PASS: TestA (0.01s)","Kind":"stdout"}]}"#,
    )
    .await;
    let notebook = Notebook::default().with_meta("play-url", url);
    let ex = execution(Cell::code("go", "package main"), notebook);

    let outcome = GoPlaygroundController::new().execute(&ex).await.unwrap();
    assert_eq!(outcome, Outcome::Success);
    match &ex.outputs()[0] {
        cb_core::OutputItem::Json { value, mime, .. } => {
            assert_eq!(mime.as_deref(), Some("application/cellbook.test"));
            assert_eq!(value["resultStatus"], "PASS");
            assert_eq!(value["testsFailed"], 0);
        }
        other => panic!("expected a test-tree payload, got {other:?}"),
    }
}

#[tokio::test]
async fn pre_canceled_execution_never_sends_the_request() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let notebook = Notebook::default().with_meta("play-url", "http://127.0.0.1:1/compile");
    let ex = Execution::new(Cell::code("go", ""), 0, Arc::new(notebook), cancel);

    let outcome = GoPlaygroundController::new().execute(&ex).await.unwrap();
    assert_eq!(outcome, Outcome::Canceled);
    assert_eq!(ex.outputs()[0].as_text(), Some("Canceled"));
}

#[tokio::test]
async fn event_replay_honors_form_feed_and_stderr_kinds() {
    let controller = GoPlaygroundController::new();
    let ex = execution(Cell::code("go", ""), Notebook::default());
    let events = vec![
        CompileEvent { delay: None, kind: Some("stdout".into()), message: Some("old".into()) },
        CompileEvent {
            delay: Some(1_000_000),
            kind: Some("stdout".into()),
            message: Some("\u{000c}fresh".into()),
        },
        CompileEvent { delay: None, kind: Some("stderr".into()), message: Some("warn".into()) },
        CompileEvent { delay: None, kind: None, message: Some("dropped".into()) },
    ];

    let outcome = controller.replay_events(&ex, events).await.unwrap();
    assert!(outcome.is_none());

    let outputs = ex.outputs();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].as_text(), Some("fresh"));
    assert!(outputs[1].is_error());
}
