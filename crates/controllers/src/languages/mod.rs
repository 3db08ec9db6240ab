// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in language controllers

pub mod go;
pub mod go_cloud;
pub mod java;
pub mod java_cloud;
pub mod json;
pub mod lua;
pub mod markup;
pub mod mysql;
pub mod python;
pub mod sqlite;

use std::sync::Arc;

pub use go::GoController;
pub use go_cloud::GoPlaygroundController;
pub use java::JavaController;
pub use java_cloud::JavaCloudController;
pub use json::JsonController;
pub use lua::LuaController;
pub use markup::{HtmlController, MarkdownController};
pub use mysql::MySqlController;
pub use python::PythonController;
pub use sqlite::SqliteController;

use crate::registry::Registry;

/// Register every built-in controller, enabled. Local controllers come
/// before their cloud twins so they win language dispatch by default.
pub fn register_defaults(registry: &Registry) {
    registry.register(Arc::new(GoController::new()));
    registry.register(Arc::new(GoPlaygroundController::new()));
    registry.register(Arc::new(JavaController::new()));
    registry.register(Arc::new(JavaCloudController::new()));
    registry.register(Arc::new(PythonController::new()));
    registry.register(Arc::new(SqliteController::new()));
    registry.register(Arc::new(MySqlController::new()));
    registry.register(Arc::new(HtmlController::new()));
    registry.register(Arc::new(MarkdownController));
    registry.register(Arc::new(JsonController));
    registry.register(Arc::new(LuaController));
}

/// Shared contributor entry for the built-in controllers.
pub(crate) fn builtin_contributors() -> Vec<cb_core::Contributor> {
    vec![cb_core::Contributor {
        name: "Cellbook Maintainers".to_string(),
        email: None,
        url: Some("https://github.com/cellbook".to_string()),
    }]
}
