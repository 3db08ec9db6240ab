// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn metadata_field_builder() {
    let field = MetadataField::new(IS_EXECUTABLE)
        .description("set \"true\" if the cell should be compiled and run")
        .allowed(&["true", "false"]);
    assert_eq!(field.key, "is-executable");
    assert_eq!(field.enum_values, vec!["true", "false"]);
    assert!(!field.required);
}

#[test]
fn metadata_field_serializes_enum_key() {
    let field = MetadataField::new("x").allowed(&["a"]);
    let json = serde_json::to_value(&field).unwrap();
    assert_eq!(json["enum"], serde_json::json!(["a"]));
}

#[test]
fn hook_script_parses_from_metadata_value() {
    let value = serde_json::json!({"kind": "lua", "code": "before = function() end"});
    let script = HookScript::from_value(&value).unwrap();
    assert_eq!(script.kind, HookKind::Lua);
    assert!(script.code.starts_with("before"));
}

#[test]
fn hook_script_rejects_unknown_kind() {
    let value = serde_json::json!({"kind": "cobol", "code": ""});
    let err = HookScript::from_value(&value).unwrap_err();
    assert!(err.to_string().contains("$script"));
}
