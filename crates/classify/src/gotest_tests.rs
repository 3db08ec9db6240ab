// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn subtest_tree_with_shared_parent() {
    let transcript = "\
=== RUN TestA
=== RUN TestA/Sub1
--- PASS: TestA/Sub1 (0.01s)
--- FAIL: TestA (0.02s)
FAIL
";
    let result = GoTestClassifier::new(transcript).classify();

    assert_eq!(result.result_status, TestStatus::Fail);
    assert_eq!(result.tests_failed, Some(1));
    assert_eq!(result.tests.len(), 1);

    let root = &result.tests[0];
    assert_eq!(root.name, "TestA");
    assert_eq!(root.status, TestStatus::Fail);
    assert_eq!(root.time, Some(20));
    assert_eq!(root.children.len(), 1);

    let sub = &root.children[0];
    assert_eq!(sub.name, "Sub1");
    assert_eq!(sub.status, TestStatus::Pass);
    assert_eq!(sub.time, Some(10));
}

#[test]
fn sibling_subtests_reuse_the_parent_node() {
    let transcript = "\
=== RUN TestA
=== RUN TestA/One
=== RUN TestA/Two
--- PASS: TestA/One (0.00s)
--- PASS: TestA/Two (0.00s)
--- PASS: TestA (0.00s)
";
    let result = GoTestClassifier::new(transcript).classify();
    assert_eq!(result.tests.len(), 1);
    assert_eq!(result.tests[0].children.len(), 2);
    assert_eq!(result.result_status, TestStatus::Pass);
    assert_eq!(result.tests_failed, Some(0));
}

#[test]
fn info_lines_attach_to_the_last_created_node() {
    let transcript = "\
=== RUN TestFails
    main_test.go:7: expected 2, got 3
--- FAIL: TestFails (0.00s)
";
    let result = GoTestClassifier::new(transcript).classify();
    let node = &result.tests[0];
    assert_eq!(node.msg.as_deref(), Some("main_test.go:7: expected 2, got 3"));
}

#[test]
fn unmatched_result_lines_are_dropped_silently() {
    let transcript = "--- PASS: NeverDeclared (0.10s)\n";
    let result = GoTestClassifier::new(transcript).classify();
    assert!(result.tests.is_empty());
    assert_eq!(result.result_status, TestStatus::Pass);
}

#[test]
fn bare_fail_summary_lines_have_no_node_effect() {
    let transcript = "\
=== RUN TestA
--- PASS: TestA (0.00s)
FAIL
FAIL\texample.com/pkg\t0.31s
";
    let result = GoTestClassifier::new(transcript).classify();
    assert_eq!(result.tests_failed, Some(0));
    assert_eq!(result.result_status, TestStatus::Pass);
    assert!(result.tests[0].msg.is_none());
}

#[test]
fn supplied_verdict_and_count_are_authoritative() {
    let transcript = "\
=== RUN TestA
--- FAIL: TestA (0.00s)
";
    let result = GoTestClassifier::new(transcript)
        .passed(Some(true))
        .tests_failed(Some(0))
        .classify();
    // No reconciliation against the transcript's own FAIL line.
    assert_eq!(result.result_status, TestStatus::Pass);
    assert_eq!(result.tests_failed, Some(0));
    assert_eq!(result.tests[0].status, TestStatus::Fail);
}

#[yare::parameterized(
    truncates_fraction = { "(0.0199s)", Some(19) },
    whole_seconds      = { "(2.00s)",   Some(2000) },
    garbage            = { "(fasts)",   None },
    missing_parens     = { "0.01s",     None },
)]
fn time_parsing(token: &str, expected: Option<u64>) {
    assert_eq!(parse_time_ms(token), expected);
}

#[test]
fn deep_nesting_follows_slash_segments() {
    let transcript = "\
=== RUN TestA
=== RUN TestA/B
=== RUN TestA/B/C
--- PASS: TestA/B/C (0.50s)
";
    let result = GoTestClassifier::new(transcript).classify();
    let c = &result.tests[0].children[0].children[0];
    assert_eq!(c.name, "C");
    assert_eq!(c.status, TestStatus::Pass);
    assert_eq!(c.time, Some(500));
}
