// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trusted in-process lua execution

use async_trait::async_trait;
use cb_core::{Contributor, Outcome};
use mlua::{Lua, LuaOptions, StdLib};

use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;

/// Evaluates lua cells inline in a restricted interpreter: stdlib limited
/// to table/string/math, and the only way out is a console-shaped sink
/// writing to the execution's output. No process, no files, no network.
pub struct LuaController;

impl LuaController {
    fn build_sandbox(ex: &Execution) -> Result<Lua, mlua::Error> {
        let lua = Lua::new_with(StdLib::TABLE | StdLib::STRING | StdLib::MATH, LuaOptions::default())?;

        let sink = ex.sink().clone();
        let log = lua.create_function(move |_, args: mlua::Variadic<mlua::Value>| {
            let parts: Vec<String> = args.iter().map(display_value).collect();
            sink.append_text(parts.join("\t"));
            Ok(())
        })?;

        let console = lua.create_table()?;
        console.set("log", log.clone())?;
        lua.globals().set("console", console)?;
        lua.globals().set("print", log)?;
        Ok(lua)
    }
}

fn display_value(value: &mlua::Value) -> String {
    match value {
        mlua::Value::Nil => "nil".to_string(),
        mlua::Value::Boolean(b) => b.to_string(),
        mlua::Value::Integer(i) => i.to_string(),
        mlua::Value::Number(n) => n.to_string(),
        mlua::Value::String(s) => s.to_string_lossy().to_string(),
        other => format!("<{}>", other.type_name()),
    }
}

#[async_trait]
impl Controller for LuaController {
    fn id(&self) -> &str {
        "lua-vm"
    }

    fn label(&self) -> &str {
        "Lua VM"
    }

    fn supported_languages(&self) -> &[&str] {
        &["lua"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Run lua code in an embedded interpreter")
    }

    fn description(&self) -> Option<&str> {
        Some("Sandboxed in-process execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        let lua = Self::build_sandbox(ex)?;
        match lua.load(&ex.cell().content).set_name("cell").exec() {
            Ok(()) => Ok(Outcome::Success),
            Err(e) => {
                ex.append_error_output(e.to_string());
                Ok(Outcome::Failure)
            }
        }
    }
}

impl OnControllerInfo for LuaController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("lua-vm.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("lua-vm.md")
    }
}

#[cfg(test)]
#[path = "lua_tests.rs"]
mod tests;
