// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn artifact_directory_is_removed_on_drop() {
    let artifact = TempArtifact::new().unwrap();
    let path = artifact.write_unique("notebook", ".go", "package main").unwrap();
    assert!(path.exists());
    let dir = artifact.path().to_path_buf();
    drop(artifact);
    assert!(!dir.exists());
    assert!(!path.exists());
}

#[test]
fn unique_writes_do_not_collide() {
    let artifact = TempArtifact::new().unwrap();
    let a = artifact.write_unique("notebook", ".py", "1").unwrap();
    let b = artifact.write_unique("notebook", ".py", "2").unwrap();
    assert_ne!(a, b);
    assert_eq!(std::fs::read_to_string(&b).unwrap(), "2");
}

#[test]
fn exact_names_are_honored() {
    let artifact = TempArtifact::new().unwrap();
    let path = artifact.write_file("Main.java", "class Main {}").unwrap();
    assert!(path.ends_with("Main.java"));
}
