// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The polymorphic controller contract

use async_trait::async_trait;
use cb_core::{Contributor, MetadataField, Outcome};
use serde::{Deserialize, Serialize};

use crate::checks::CompatibilityChecker;
use crate::error::ControllerError;
use crate::execution::Execution;

/// A language plugin: declares the languages it accepts and turns a cell
/// execution into a tri-state outcome.
///
/// Optional capabilities are modeled as accessor methods returning trait
/// objects rather than inheritance — a controller without a capability
/// simply returns `None`.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Unique controller identifier.
    fn id(&self) -> &str;

    /// Human-readable controller name.
    fn label(&self) -> &str;

    /// Language identifiers this controller accepts.
    fn supported_languages(&self) -> &[&str];

    fn detail(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    /// Run one cell. Errors are caught at the registry boundary and become
    /// an error output plus a failed outcome.
    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError>;

    /// Presentation metadata capability.
    fn info(&self) -> Option<&dyn OnControllerInfo> {
        None
    }

    /// Environment compatibility-check capability.
    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        None
    }
}

/// Human-facing controller details. Presentation pass-through only — the
/// core never interprets any of it.
pub trait OnControllerInfo: Send + Sync {
    fn contributors(&self) -> Vec<Contributor> {
        Vec::new()
    }

    /// Icon asset name (resolved by the host).
    fn icon(&self) -> Option<&str> {
        None
    }

    /// Getting-started guide asset name (resolved by the host).
    fn getting_started_guide(&self) -> Option<&str> {
        None
    }

    /// Cell-level metadata keys this controller understands.
    fn cell_metadata(&self) -> Vec<MetadataField> {
        Vec::new()
    }

    /// Notebook-level metadata keys this controller understands.
    fn notebook_metadata(&self) -> Vec<MetadataField> {
        Vec::new()
    }
}

/// Assembled controller details handed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contributor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getting_started_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cell_metadata: Vec<MetadataField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notebook_metadata: Vec<MetadataField>,
}

impl ControllerInfo {
    /// Assemble the pass-through snapshot for one controller, folding in
    /// the optional info capability when present.
    pub fn from_controller(controller: &dyn Controller) -> Self {
        let info = controller.info();
        Self {
            id: controller.id().to_string(),
            name: controller.label().to_string(),
            supported_languages: controller
                .supported_languages()
                .iter()
                .map(|l| l.to_string())
                .collect(),
            detail: controller.detail().map(str::to_string),
            description: controller.description().map(str::to_string),
            contributors: info.map(|i| i.contributors()).unwrap_or_default(),
            icon_name: info.and_then(|i| i.icon()).map(str::to_string),
            getting_started_path: info.and_then(|i| i.getting_started_guide()).map(str::to_string),
            cell_metadata: info.map(|i| i.cell_metadata()).unwrap_or_default(),
            notebook_metadata: info.map(|i| i.notebook_metadata()).unwrap_or_default(),
        }
    }
}
