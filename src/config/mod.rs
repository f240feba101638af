//! Configuration for rayboot
//!
//! Configuration is optional. Every key has a default that reproduces the classic
//! layout (`dependencies/`, `build/`, `cmake`), so most projects never need a file.
//!
//! # Location Priority
//!
//! 1. `--config <file>` (must exist)
//! 2. `<project>/rayboot.toml` (used if present)
//! 3. Built-in defaults
//!
//! After loading, `RAYBOOT_BUILD_TOOL` overrides `build_tool`.
//!
//! # Format
//!
//! ```toml
//! dependencies_dir = "dependencies"
//! build_dir = "build"
//! build_tool = "cmake"
//! with_imgui = false
//! download_timeout_secs = 300
//!
//! [sanitize]
//! folders = [".github", "docs", "examples"]
//! files = ["LICENSE", "LICENSE.txt", "README.md", "CHANGELOG"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    BUILD_TOOL_ENV, DEFAULT_BUILD_DIR, DEFAULT_BUILD_TOOL, DEFAULT_DEPENDENCIES_DIR,
    DEFAULT_DOWNLOAD_TIMEOUT, DENYLISTED_FILES, DENYLISTED_FOLDERS, PROJECT_CONFIG_FILE,
};
use crate::core::BootstrapError;
use crate::models::ProjectPaths;

/// Settings for a bootstrap run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Dependency directory name, relative to the project root
    pub dependencies_dir: String,

    /// Build directory name, relative to the project root
    pub build_dir: String,

    /// Build tool executable (name in `PATH` or absolute path)
    pub build_tool: String,

    /// Also clone imgui and rlImGui
    pub with_imgui: bool,

    /// Per-download timeout in seconds
    pub download_timeout_secs: u64,

    /// Denylists applied after fetching
    pub sanitize: SanitizeConfig,
}

/// Folder and file names removed from fetched dependencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizeConfig {
    /// Directory names removed with all their contents
    pub folders: Vec<String>,
    /// File names removed
    pub files: Vec<String>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            folders: DENYLISTED_FOLDERS.iter().map(ToString::to_string).collect(),
            files: DENYLISTED_FILES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            dependencies_dir: DEFAULT_DEPENDENCIES_DIR.to_string(),
            build_dir: DEFAULT_BUILD_DIR.to_string(),
            build_tool: DEFAULT_BUILD_TOOL.to_string(),
            with_imgui: false,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT.as_secs(),
            sanitize: SanitizeConfig::default(),
        }
    }
}

impl BootstrapConfig {
    /// Load configuration for a project.
    ///
    /// An explicit path must exist; the project file is optional.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ConfigError`] when the file cannot be read or parsed.
    pub async fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path).await?,
            None => {
                let path = project_root.join(PROJECT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(&path).await?
                } else {
                    tracing::debug!("No {} in {}, using defaults", PROJECT_CONFIG_FILE, project_root.display());
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| BootstrapError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| BootstrapError::ConfigError {
            message: format!("invalid {}: {e}", path.display()),
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        config.validate().with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("dependencies_dir", &self.dependencies_dir),
            ("build_dir", &self.build_dir),
            ("build_tool", &self.build_tool),
        ] {
            if value.trim().is_empty() {
                return Err(BootstrapError::ConfigError {
                    message: format!("'{key}' must not be empty"),
                }
                .into());
            }
        }
        for (key, value) in [("dependencies_dir", &self.dependencies_dir), ("build_dir", &self.build_dir)] {
            check_project_subdir(key, value)?;
        }

        let dependencies = Path::new(&self.dependencies_dir);
        let build = Path::new(&self.build_dir);
        if dependencies.starts_with(build) || build.starts_with(dependencies) {
            return Err(BootstrapError::ConfigError {
                message: "'dependencies_dir' and 'build_dir' must differ and must not contain each other"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(tool) = std::env::var(BUILD_TOOL_ENV) {
            if !tool.trim().is_empty() {
                tracing::debug!("{} overrides build tool: {}", BUILD_TOOL_ENV, tool);
                self.build_tool = tool;
            }
        }
    }

    /// Project directories for `root` using the configured names.
    #[must_use]
    pub fn paths(&self, root: impl Into<PathBuf>) -> ProjectPaths {
        ProjectPaths::with_dirs(root, &self.dependencies_dir, &self.build_dir)
    }

    /// Per-download timeout.
    #[must_use]
    pub const fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Directories are deleted and sanitized recursively, so they must stay strictly
/// inside the project root.
fn check_project_subdir(key: &str, value: &str) -> Result<()> {
    let path = Path::new(value);
    let inside_root = !path.is_absolute()
        && path.components().all(|component| matches!(component, Component::Normal(_)));
    if !inside_root {
        return Err(BootstrapError::ConfigError {
            message: format!(
                "'{key}' = \"{value}\" must be a relative path inside the project (no '.', '..' or absolute paths)"
            ),
        }
        .into());
    }
    Ok(())
}
