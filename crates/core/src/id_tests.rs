// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

#[test]
fn unique_tokens_do_not_collide() {
    let tokens: HashSet<_> = (0..1000).map(|_| unique_token()).collect();
    assert_eq!(tokens.len(), 1000);
}

#[test]
fn unique_name_keeps_stem_and_extension() {
    let name = unique_name("notebook", ".go");
    assert!(name.starts_with("notebook_"));
    assert!(name.ends_with(".go"));
    assert_ne!(name, unique_name("notebook", ".go"));
}
