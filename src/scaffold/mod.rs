//! Project scaffolding
//!
//! Generates the three files a fresh raylib project needs, all relative to the
//! project root:
//!
//! | File | Content |
//! |------|---------|
//! | `CMakeLists.txt` | Rendered with Tera; only the dependency path varies |
//! | `main.cpp` | raylib "basic window" program |
//! | `.vscode/c_cpp_properties.json` | MSVC IntelliSense configuration |
//!
//! Existing files are always overwritten.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

use crate::constants::{C_CPP_PROPERTIES_FILE, CMAKE_LISTS_FILE, EXECUTABLE_NAME, MAIN_SOURCE_FILE, VSCODE_DIR};
use crate::models::ProjectPaths;
use crate::utils::{normalize_path_for_storage, write_text_file};

const CMAKE_LISTS_TEMPLATE: &str = include_str!("templates/CMakeLists.txt.tera");
const MAIN_SOURCE: &str = include_str!("templates/main.cpp");
const C_CPP_PROPERTIES: &str = include_str!("templates/c_cpp_properties.json");

/// Render `CMakeLists.txt` for a dependency directory.
///
/// Backslashes in `dependencies_path` are converted to forward slashes, which
/// CMake accepts on every platform.
pub fn render_cmake_lists(dependencies_path: &Path) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("dependencies_path", &normalize_path_for_storage(dependencies_path));
    context.insert("executable", EXECUTABLE_NAME);

    Tera::one_off(CMAKE_LISTS_TEMPLATE, &context, false).context("Failed to render CMakeLists.txt template")
}

/// Writes generated files into a project.
#[derive(Debug, Clone, Copy)]
pub struct Scaffold<'a> {
    paths: &'a ProjectPaths,
}

impl<'a> Scaffold<'a> {
    pub const fn new(paths: &'a ProjectPaths) -> Self {
        Self {
            paths,
        }
    }

    /// Write `CMakeLists.txt` pointing at the dependency directory.
    pub fn write_cmake_lists(&self) -> Result<PathBuf> {
        let content = render_cmake_lists(&self.paths.dependencies)?;
        self.write(self.paths.root.join(CMAKE_LISTS_FILE), &content)
    }

    /// Write the `main.cpp` stub.
    pub fn write_main_source(&self) -> Result<PathBuf> {
        self.write(self.paths.root.join(MAIN_SOURCE_FILE), MAIN_SOURCE)
    }

    /// Write `.vscode/c_cpp_properties.json`.
    pub fn write_editor_config(&self) -> Result<PathBuf> {
        self.write(self.paths.root.join(VSCODE_DIR).join(C_CPP_PROPERTIES_FILE), C_CPP_PROPERTIES)
    }

    /// Write all three files, in the order source, editor config, build config.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        Ok(vec![self.write_main_source()?, self.write_editor_config()?, self.write_cmake_lists()?])
    }

    fn write(&self, path: PathBuf, content: &str) -> Result<PathBuf> {
        write_text_file(&path, content)?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), content.len());

        let display = path.strip_prefix(&self.paths.root).unwrap_or(&path);
        crate::status!("{} Created {}", "✓".green(), normalize_path_for_storage(display));
        Ok(path)
    }
}
