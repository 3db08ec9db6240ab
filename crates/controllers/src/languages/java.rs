// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local java execution (compile + run)

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use cb_core::{meta, Cell, Contributor, Metadata, MetadataField, Outcome};
use cb_exec::ProcessExecutor;
use regex::Regex;

use crate::checks::{CompatibilityChecker, ExecutableCheck, ExecutableCompatibility};
use crate::controller::{Controller, OnControllerInfo};
use crate::error::ControllerError;
use crate::execution::Execution;
use crate::handlers::{CollectHandler, SinkHandler};
use crate::temp::TempArtifact;

const COMPILE_CMD: &str = "javac -d {class_dir} -cp {class_dir} {path}";
const RUN_CMD: &str = "java -cp {class_dir} {pkg}{class}";
const DEFAULT_FILE_NAME: &str = "Main";
const JAVA_EXT: &str = ".java";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PKG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"package\s+([\w.]+);").expect("constant regex pattern is valid"));

/// Compiles and runs java cells locally. Cells can pull sibling cells into
/// the compilation via the `import` metadata key (a `;`-separated package
/// list matched against the siblings' `package` declarations), and opt out
/// of execution entirely with `is-executable = "false"`.
///
/// The run phase speaks the interactive protocol: input prompts reach the
/// host's input provider and replies feed the child's stdin.
pub struct JavaController {
    compat: ExecutableCompatibility,
}

impl JavaController {
    pub fn new() -> Self {
        Self {
            compat: ExecutableCompatibility::new(vec![
                Arc::new(ExecutableCheck::new("java compiler", "javac").version_args(&["-version"])),
                Arc::new(ExecutableCheck::new("java runtime", "java").version_args(&["-version"])),
            ]),
        }
    }

    /// File name for a cell: `file-name` metadata, default `Main`, with a
    /// stray `.java` suffix tolerated.
    fn file_name(metadata: &Metadata) -> String {
        let name = metadata
            .get(meta::FILE_NAME)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(DEFAULT_FILE_NAME)
            .trim();
        let name = name.strip_suffix(JAVA_EXT).unwrap_or(name);
        name.to_string()
    }

    fn package_name(content: &str) -> Option<String> {
        PKG_PATTERN.captures(content).map(|c| c[1].to_string())
    }

    /// The cell's own source plus any sibling cells whose package names are
    /// listed in the `import` metadata.
    fn source_files(ex: &Execution) -> BTreeMap<String, String> {
        let cell = ex.cell();
        let mut files = BTreeMap::new();
        files.insert(
            format!("{}{JAVA_EXT}", Self::file_name(&cell.metadata)),
            cell.content.clone(),
        );

        let Some(imports) = cell.meta_str(meta::IMPORT) else {
            return files;
        };
        let packages: Vec<&str> = imports.split(';').map(str::trim).filter(|p| !p.is_empty()).collect();

        for (index, sibling) in ex.notebook().cells.iter().enumerate() {
            if index == ex.cell_index() || sibling.meta_str(meta::FILE_NAME).is_none() {
                continue;
            }
            let in_imports = Self::package_name(&sibling.content)
                .map(|pkg| packages.contains(&pkg.as_str()))
                .unwrap_or(false);
            if in_imports {
                files.insert(
                    format!("{}{JAVA_EXT}", Self::file_name(&sibling.metadata)),
                    sibling.content.clone(),
                );
            }
        }
        files
    }

    fn is_executable(cell: &Cell) -> bool {
        match cell.meta_str(meta::IS_EXECUTABLE) {
            None => true,
            Some(flag) => flag == "true",
        }
    }

    async fn compile(
        &self,
        ex: &Execution,
        class_dir: &str,
        paths: &[String],
    ) -> Result<Option<Outcome>, ControllerError> {
        // {path} expands to several arguments, so the command is assembled
        // textually; temp paths contain no whitespace.
        let command = COMPILE_CMD
            .replace("{class_dir}", class_dir)
            .replace("{path}", &paths.join(" "));

        let collector = CollectHandler::new();
        ProcessExecutor::new(&command)?.execute(&collector, ex.token()).await;

        if collector.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Some(Outcome::Canceled));
        }
        let mut errors = collector.failures();
        errors.extend(collector.stderr());
        if !errors.is_empty() {
            for error in errors {
                // Temp-dir noise stripped so messages point at cell code.
                ex.append_error_output(error.replace(&format!("{class_dir}/"), ""));
            }
            return Ok(Some(Outcome::Failure));
        }
        Ok(None)
    }

    async fn run(
        &self,
        ex: &Execution,
        class_dir: &str,
        main_class: &str,
        package: Option<String>,
    ) -> Result<Outcome, ControllerError> {
        let package = package.map(|p| format!("{p}.")).unwrap_or_default();
        let executor = ProcessExecutor::new(RUN_CMD)?
            .replace_token("{class_dir}", class_dir)
            .replace_token("{pkg}{class}", &format!("{package}{main_class}"));

        let handler = SinkHandler::new(ex);
        executor.execute(&handler, ex.token()).await;

        if handler.was_canceled() {
            ex.append_text_output("Canceled");
            return Ok(Outcome::Canceled);
        }
        Ok(if handler.saw_error() { Outcome::Failure } else { Outcome::Success })
    }
}

impl Default for JavaController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for JavaController {
    fn id(&self) -> &str {
        "java-local"
    }

    fn label(&self) -> &str {
        "Java Local"
    }

    fn supported_languages(&self) -> &[&str] {
        &["java"]
    }

    fn detail(&self) -> Option<&str> {
        Some("Compile and run java code locally")
    }

    fn description(&self) -> Option<&str> {
        Some("Local java execution")
    }

    fn info(&self) -> Option<&dyn OnControllerInfo> {
        Some(self)
    }

    fn compatibility(&self) -> Option<&dyn CompatibilityChecker> {
        Some(&self.compat)
    }

    async fn execute(&self, ex: &Execution) -> Result<Outcome, ControllerError> {
        if !Self::is_executable(ex.cell()) {
            return Ok(Outcome::Canceled);
        }

        let artifact = TempArtifact::new()?;
        let class_dir = artifact.path().to_string_lossy().to_string();

        let mut paths = Vec::new();
        for (name, content) in Self::source_files(ex) {
            let path = artifact.write_file(&name, &content)?;
            paths.push(path.to_string_lossy().to_string());
        }

        if let Some(outcome) = self.compile(ex, &class_dir, &paths).await? {
            return Ok(outcome);
        }

        let main_class = Self::file_name(&ex.cell().metadata);
        let package = Self::package_name(&ex.cell().content);
        self.run(ex, &class_dir, &main_class, package).await
    }
}

impl OnControllerInfo for JavaController {
    fn contributors(&self) -> Vec<Contributor> {
        super::builtin_contributors()
    }

    fn icon(&self) -> Option<&str> {
        Some("java-local.png")
    }

    fn getting_started_guide(&self) -> Option<&str> {
        Some("java-local.md")
    }

    fn cell_metadata(&self) -> Vec<MetadataField> {
        vec![
            MetadataField::new(meta::IMPORT).description(
                "list of imported packages divided by ;\nEx: com.pkg1;com.pkg2;com.company.pkg3",
            ),
            MetadataField::new(meta::IS_EXECUTABLE)
                .description("set \"true\" if the cell should be compiled and run, and \"false\" if not")
                .allowed(&["true", "false"]),
            MetadataField::new(meta::FILE_NAME)
                .description("name of the java file for this class")
                .default_value(DEFAULT_FILE_NAME),
        ]
    }
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod tests;
