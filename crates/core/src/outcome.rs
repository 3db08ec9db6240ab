// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tri-state execution outcome

use serde::{Deserialize, Serialize};

/// The result of one cell execution.
///
/// `Canceled` covers canceled-or-indeterminate: a run whose cancellation
/// signal fired, and a cell a controller declines to execute (for example a
/// `css` cell, or a java cell marked non-executable). It is always
/// distinguishable from `Failure` ("ran and failed").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Canceled,
}

impl Outcome {
    /// Build from the host-facing optional-boolean encoding.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Success,
            Some(false) => Self::Failure,
            None => Self::Canceled,
        }
    }

    /// The host-facing optional-boolean encoding (`None` = canceled).
    pub fn flag(self) -> Option<bool> {
        match self {
            Self::Success => Some(true),
            Self::Failure => Some(false),
            Self::Canceled => None,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn is_canceled(self) -> bool {
        self == Self::Canceled
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Canceled => "canceled",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
