// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level behavior specs
//!
//! End-to-end checks of the execution host's contract, driven through
//! portable stand-in commands (`sh`, `printf`, `sleep`) so the suite runs
//! on any unix machine.

use std::sync::Arc;
use std::time::Duration;

use cb_controllers::languages::{GoController, PythonController};
use cb_controllers::{Controller, Execution, Registry};
use cb_core::{Cell, Notebook, Outcome, OutputItem};
use tokio_util::sync::CancellationToken;

fn sh_cell(script: &str) -> Cell {
    // The python controller appends the temp script path as a trailing
    // argument; `sh -c '<script>' ignored <path>` swallows it harmlessly.
    Cell::code("python", "unused").with_meta("execution", format!("sh -c '{script}' ignored"))
}

async fn run_cell(cell: Cell) -> (Outcome, Vec<OutputItem>) {
    let registry = Registry::new();
    cb_controllers::languages::register_defaults(&registry);
    let run = registry
        .run_cell(cell, 0, Arc::new(Notebook::default()), CancellationToken::new())
        .await;
    (run.outcome, run.outputs)
}

fn texts(outputs: &[OutputItem]) -> String {
    outputs.iter().filter_map(|o| o.as_text()).collect()
}

// ---------------------------------------------------------------------------
// Tri-state outcome invariant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn outcome_is_success_on_clean_exit() {
    let (outcome, _) = run_cell(sh_cell("echo fine")).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(outcome.flag(), Some(true));
}

#[tokio::test]
async fn outcome_is_failure_on_stderr() {
    let (outcome, _) = run_cell(sh_cell("echo broken 1>&2")).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(outcome.flag(), Some(false));
}

#[tokio::test]
async fn outcome_is_canceled_exactly_when_the_signal_fired() {
    let cancel = CancellationToken::new();
    let run = {
        let cancel = cancel.clone();
        let cell = sh_cell("echo started; sleep 5");
        tokio::spawn(async move {
            let registry = Registry::new();
            cb_controllers::languages::register_defaults(&registry);
            registry.run_cell(cell, 0, Arc::new(Notebook::default()), cancel).await
        })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    let run = run.await.unwrap();

    assert_eq!(run.outcome, Outcome::Canceled);
    assert_eq!(run.outcome.flag(), None);
    assert_eq!(texts(&run.outputs), "started\nCanceled");
}

// ---------------------------------------------------------------------------
// Temp-artifact cleanup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn temp_artifacts_are_gone_after_every_outcome() {
    // `echo {xprog}` leaks the artifact path into the output, so the spec
    // can check the file is gone after the run settles.
    for (template, expected) in [
        ("echo {xprog}", Outcome::Success),
        (r#"sh -c "echo $0 1>&2" {xprog}"#, Outcome::Failure),
    ] {
        let cell = Cell::code("go", "package main").with_meta("execution", template);
        let ex = Execution::new(cell, 0, Arc::new(Notebook::default()), CancellationToken::new());
        let outcome = GoController::new().execute(&ex).await.unwrap();
        assert_eq!(outcome, expected);

        let mentioned: String = ex
            .outputs()
            .iter()
            .filter_map(|o| match o {
                OutputItem::Text { text, .. } => Some(text.clone()),
                OutputItem::Error { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect();
        let path = mentioned
            .lines()
            .find(|l| l.contains("cellbook-"))
            .unwrap_or_else(|| panic!("artifact path not echoed: {mentioned}"))
            .trim();
        assert!(!std::path::Path::new(path).exists(), "artifact survived the run: {path}");
    }
}

// ---------------------------------------------------------------------------
// Output ordering and clear boundaries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn output_order_matches_emission_order() {
    let (_, outputs) = run_cell(sh_cell("printf one; sleep 0.1; printf two")).await;
    assert_eq!(texts(&outputs), "onetwo");
}

#[tokio::test]
async fn clear_drops_prior_output_only() {
    let (outcome, outputs) =
        run_cell(sh_cell(r#"printf "old\n"; sleep 0.1; printf "\fnew "; sleep 0.1; printf later"#))
            .await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(texts(&outputs), "new later");
}

// ---------------------------------------------------------------------------
// Go-test classification (the canonical transcript)
// ---------------------------------------------------------------------------

#[test]
fn canonical_go_transcript_classifies_to_the_expected_tree() {
    let transcript = "\
=== RUN TestA
=== RUN TestA/Sub1
--- PASS: TestA/Sub1 (0.01s)
--- FAIL: TestA (0.02s)
FAIL
";
    let result = cb_classify::GoTestClassifier::new(transcript).classify();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["resultStatus"], "FAIL");
    assert_eq!(json["testsFailed"], 1);
    assert_eq!(json["tests"][0]["name"], "TestA");
    assert_eq!(json["tests"][0]["status"], "FAIL");
    assert_eq!(json["tests"][0]["time"], 20);
    assert_eq!(json["tests"][0]["children"][0]["name"], "Sub1");
    assert_eq!(json["tests"][0]["children"][0]["status"], "PASS");
    assert_eq!(json["tests"][0]["children"][0]["time"], 10);
}

// ---------------------------------------------------------------------------
// Table classifier column integrity
// ---------------------------------------------------------------------------

#[test]
fn parsed_tables_are_always_rectangular_with_unique_columns() {
    let transcript = "\
id          name
----------  ----------
1           ada
2           bob

total
----------
2
";
    for table in cb_classify::classify_tables(transcript) {
        assert!(table.is_rectangular());
        let names: Vec<_> = table.columns.iter().collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
        for column in &table.columns {
            assert_eq!(table.rows[column].len(), table.row_count());
        }
    }
}

// ---------------------------------------------------------------------------
// Command substitution exactness
// ---------------------------------------------------------------------------

#[test]
fn token_substitution_is_textual_token_exact() {
    let command = cb_exec::CommandLine::parse("go run {xprog}")
        .unwrap()
        .replace_token("{xprog}", "/tmp/abc.go");
    assert_eq!(command.to_string(), "go run /tmp/abc.go");
}

// ---------------------------------------------------------------------------
// Cancellation mid-stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancellation_after_two_chunks_never_delivers_the_third() {
    let cell = sh_cell(
        r#"printf "chunk1\n"; sleep 0.1; printf "chunk2\n"; sleep 5; printf "chunk3\n""#,
    );
    let cancel = CancellationToken::new();
    let ex = Execution::new(cell, 0, Arc::new(Notebook::default()), cancel.clone());
    let controller = PythonController::new();

    let watcher = {
        let sink = ex.sink().clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            for _ in 0..300 {
                let seen: String = sink
                    .snapshot()
                    .iter()
                    .filter_map(|o| o.as_text().map(str::to_string))
                    .collect();
                if seen.contains("chunk2") {
                    cancel.cancel();
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
    };

    let outcome = controller.execute(&ex).await.unwrap();
    watcher.await.unwrap();

    assert_eq!(outcome, Outcome::Canceled);
    let text = texts(&ex.outputs());
    assert!(text.contains("chunk1") && text.contains("chunk2"), "got: {text}");
    assert!(!text.contains("chunk3"), "stale chunk survived cancellation: {text}");
}

// ---------------------------------------------------------------------------
// Form-feed clear marker
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_feed_chunks_clear_then_append() {
    let (_, outputs) = run_cell(sh_cell(r#"printf "gone\n"; sleep 0.1; printf "\fHello""#)).await;
    assert_eq!(texts(&outputs), "Hello");
    assert!(!texts(&outputs).contains('\u{000c}'));
}
