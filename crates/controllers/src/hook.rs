// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-cell script hook
//!
//! A cell may carry a user script under the reserved `$script` metadata
//! key. It is compiled once, in an isolated interpreter with a restricted
//! stdlib (table/string/math — no io, no os, no process access), when the
//! cell is scheduled. The script may define `before(cell, out)` and
//! `after(cell, out, success)` globals; both get a read-only cell view and
//! the execution's output sink, so they can append diagnostics around the
//! real run without being able to alter the cell or cancel it.
//!
//! Hooks are strictly best-effort: compile and runtime errors are reported
//! through the registry's notifier and never fail the cell.

use mlua::{Lua, LuaOptions, LuaSerdeExt, StdLib, Table};

use cb_core::{meta, Cell, HookScript, Outcome};

use crate::error::ControllerError;
use crate::execution::Execution;

pub struct CellScriptHook {
    lua: Lua,
}

impl CellScriptHook {
    /// Compile the cell's hook script, if the reserved key is present.
    pub fn from_cell(cell: &Cell) -> Result<Option<Self>, ControllerError> {
        let Some(value) = cell.meta_value(meta::SCRIPT) else {
            return Ok(None);
        };
        let script =
            HookScript::from_value(value).map_err(|e| ControllerError::Other(e.to_string()))?;

        let lua = Lua::new_with(StdLib::TABLE | StdLib::STRING | StdLib::MATH, LuaOptions::default())?;
        lua.load(&script.code).set_name("cell_script").exec()?;
        Ok(Some(Self { lua }))
    }

    /// Invoke the `before` callback, if the script defined one.
    pub fn before(&self, ex: &Execution) -> Result<(), ControllerError> {
        let Some(func) = self.callback("before")? else {
            return Ok(());
        };
        func.call::<()>((self.cell_view(ex)?, self.out_table(ex)?))?;
        Ok(())
    }

    /// Invoke the `after` callback with the tri-state success flag.
    pub fn after(&self, ex: &Execution, outcome: Outcome) -> Result<(), ControllerError> {
        let Some(func) = self.callback("after")? else {
            return Ok(());
        };
        func.call::<()>((self.cell_view(ex)?, self.out_table(ex)?, outcome.flag()))?;
        Ok(())
    }

    fn callback(&self, name: &str) -> Result<Option<mlua::Function>, ControllerError> {
        Ok(self.lua.globals().get::<Option<mlua::Function>>(name)?)
    }

    /// Read-only cell view: content, index, language id and metadata.
    fn cell_view(&self, ex: &Execution) -> mlua::Result<Table> {
        let cell = ex.cell();
        let view = self.lua.create_table()?;
        view.set("content", cell.content.as_str())?;
        view.set("index", ex.cell_index())?;
        view.set("language_id", cell.language_id.as_str())?;
        view.set("metadata", self.lua.to_value(&cell.metadata)?)?;
        Ok(view)
    }

    /// The structured output sink: `text`, `json`, `error`, `clear`.
    fn out_table(&self, ex: &Execution) -> mlua::Result<Table> {
        let out = self.lua.create_table()?;

        let sink = ex.sink().clone();
        out.set(
            "text",
            self.lua.create_function(move |_, (value, mime): (String, Option<String>)| {
                sink.append_text_with(value, mime.as_deref(), None);
                Ok(())
            })?,
        )?;

        let sink = ex.sink().clone();
        out.set(
            "json",
            self.lua.create_function(move |lua, (value, mime): (mlua::Value, Option<String>)| {
                let json: serde_json::Value = lua.from_value(value)?;
                sink.append_json(json, mime.as_deref());
                Ok(())
            })?,
        )?;

        let sink = ex.sink().clone();
        out.set(
            "error",
            self.lua.create_function(move |_, message: String| {
                sink.append_error(message);
                Ok(())
            })?,
        )?;

        let sink = ex.sink().clone();
        out.set(
            "clear",
            self.lua.create_function(move |_, ()| {
                sink.clear();
                Ok(())
            })?,
        )?;

        Ok(out)
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
