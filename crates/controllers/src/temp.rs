// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped temp workspaces for execution artifacts

use std::path::{Path, PathBuf};

use cb_core::unique_name;

/// A per-execution temp directory. Removal happens on drop, which covers
/// every exit path — success, failure, error and cancellation alike.
///
/// Concurrent executions never clash: the directory itself is unique, and
/// [`write_unique`](Self::write_unique) adds a collision-resistant suffix
/// to each file name on top.
#[derive(Debug)]
pub struct TempArtifact {
    dir: tempfile::TempDir,
}

impl TempArtifact {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("cellbook-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` under an exact file name (callers that need a
    /// meaningful name, like java class files).
    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.file_path(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `contents` under `{stem}_{unique}{ext}`.
    pub fn write_unique(&self, stem: &str, ext: &str, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(&unique_name(stem, ext), contents)
    }
}

#[cfg(test)]
#[path = "temp_tests.rs"]
mod tests;
