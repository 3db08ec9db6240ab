// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collision-resistant name generation for temp artifacts

use smol_str::SmolStr;

/// Random token suitable for file names (URL-safe nanoid alphabet).
pub fn unique_token() -> SmolStr {
    SmolStr::new(nanoid::nanoid!(19))
}

/// Unique file name `{stem}_{token}{ext}`; `ext` includes its dot.
///
/// Concurrent executions share only the temp-file namespace, so every
/// artifact name routes through here.
pub fn unique_name(stem: &str, ext: &str) -> SmolStr {
    SmolStr::new(format!("{stem}_{}{ext}", nanoid::nanoid!(10)))
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
