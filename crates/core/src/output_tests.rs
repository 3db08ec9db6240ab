// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn sink_preserves_append_order() {
    let sink = OutputSink::new();
    sink.append_text("one");
    sink.append_error("two");
    sink.append_json(serde_json::json!({"n": 3}), Some(mime::STD_TEST));

    let items = sink.snapshot();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_text(), Some("one"));
    assert!(items[1].is_error());
    assert_eq!(items[2].mime(), Some(mime::STD_TEST));
}

#[test]
fn clear_drops_only_prior_items() {
    let sink = OutputSink::new();
    sink.append_text("before");
    sink.clear();
    sink.append_text("after");

    let items = sink.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_text(), Some("after"));
}

#[test]
fn cloned_handles_share_the_buffer() {
    let sink = OutputSink::new();
    let other = sink.clone();
    other.append_text("shared");
    assert_eq!(sink.len(), 1);
}

#[test]
fn error_items_carry_the_error_mime() {
    let item = OutputItem::error("boom");
    assert_eq!(item.mime(), Some(mime::STD_ERROR));
}

#[test]
fn output_item_serializes_tagged() {
    let json = serde_json::to_value(OutputItem::text_with("hi", Some(mime::HTML), None)).unwrap();
    assert_eq!(json["kind"], "text");
    assert_eq!(json["mime"], mime::HTML);
}
