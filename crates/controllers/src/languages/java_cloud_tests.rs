// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use cb_core::{Cell, Notebook, Outcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::*;

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
    format!("http://{addr}/exec")
}

async fn run_against(body: &'static str) -> (Outcome, Vec<cb_core::OutputItem>) {
    let url = serve_once(body).await;
    let notebook = Notebook::default().with_meta("compile-url", url);
    let ex = Execution::new(
        Cell::code("java", "class Main {}"),
        0,
        Arc::new(notebook),
        CancellationToken::new(),
    );
    let outcome = JavaCloudController::new().execute(&ex).await.unwrap();
    (outcome, ex.outputs())
}

#[tokio::test]
async fn stdout_maps_to_text_and_no_exception_means_success() {
    let (outcome, outputs) = run_against(r#"{"stdout":"built\n"}"#).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].as_text(), Some("built\n"));
}

#[tokio::test]
async fn exception_maps_to_error_and_failure() {
    let (outcome, outputs) =
        run_against(r#"{"exception":"java.lang.NullPointerException"}"#).await;
    assert_eq!(outcome, Outcome::Failure);
    assert!(outputs[0].is_error());
}

#[tokio::test]
async fn stderr_without_exception_still_succeeds() {
    let (outcome, outputs) = run_against(r#"{"stdout":"ok","stderr":"warning: deprecated"}"#).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(outputs.len(), 2);
    assert!(outputs[1].is_error());
}

#[tokio::test]
async fn pre_canceled_execution_short_circuits() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let notebook = Notebook::default().with_meta("compile-url", "http://127.0.0.1:1/exec");
    let ex = Execution::new(Cell::code("java", ""), 0, Arc::new(notebook), cancel);

    let outcome = JavaCloudController::new().execute(&ex).await.unwrap();
    assert_eq!(outcome, Outcome::Canceled);
    assert_eq!(ex.outputs()[0].as_text(), Some("Canceled"));
}
