//! Bootstrap pipeline
//!
//! [`Bootstrapper`] sequences the individual stages for one project:
//!
//! ```text
//! guard -> main.cpp + editor config -> fetch -> sanitize -> CMakeLists.txt -> configure/build -> run
//! ```
//!
//! The platform is resolved by the caller before a `Bootstrapper` exists, so an
//! unsupported host never reaches the guard or touches the filesystem. Every stage
//! receives explicit paths from [`ProjectPaths`].

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::build::{BuildDriver, CommandRunner, RunStatus};
use crate::config::BootstrapConfig;
use crate::core::BootstrapError;
use crate::fetch::{FetchReport, Fetcher};
use crate::models::{Dependency, ProjectPaths};
use crate::platform::Platform;
use crate::prompt::Confirm;
use crate::sanitize::{SanitizeReport, sanitize_tree};
use crate::scaffold::Scaffold;
use crate::utils::{ensure_dir, remove_dir_all};

/// Switches for [`Bootstrapper::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOptions {
    /// Also clone imgui and rlImGui
    pub with_imgui: bool,
    /// Run configure and build after scaffolding
    pub build: bool,
    /// Run the built executable
    pub run: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            with_imgui: false,
            build: true,
            run: true,
        }
    }
}

/// What a setup run did.
#[derive(Debug, Clone, Default)]
pub struct SetupSummary {
    /// Per-dependency fetch outcomes
    pub fetch: FetchReport,
    /// Entries removed from the dependency tree
    pub sanitize: SanitizeReport,
    /// Exit status of the smoke-test run, if the executable was run
    pub executable_status: Option<RunStatus>,
}

/// Runs the bootstrap stages for one project.
pub struct Bootstrapper<C, R> {
    config: BootstrapConfig,
    paths: ProjectPaths,
    platform: Platform,
    confirm: C,
    driver: BuildDriver<R>,
    dependencies: Option<Vec<Dependency>>,
}

impl<C: Confirm, R: CommandRunner> Bootstrapper<C, R> {
    pub fn new(
        config: BootstrapConfig,
        project_root: &Path,
        platform: Platform,
        confirm: C,
        runner: R,
    ) -> Self {
        let paths = config.paths(project_root);
        let driver = BuildDriver::new(runner, config.build_tool.clone());
        Self {
            config,
            paths,
            platform,
            confirm,
            driver,
            dependencies: None,
        }
    }

    /// Fetch `dependencies` instead of the platform's table (mirrors, tests).
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    /// Project directories.
    pub const fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// The build driver, exposing the command runner.
    pub const fn driver(&self) -> &BuildDriver<R> {
        &self.driver
    }

    /// The confirmation provider.
    pub const fn confirm(&self) -> &C {
        &self.confirm
    }

    /// Full pipeline.
    ///
    /// Fetch failures do not stop the run; they are summarized before the build
    /// starts. Build tool failures are fatal.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::Aborted`] if deleting the existing dependency directory
    ///   was declined
    /// - [`BootstrapError::BuildToolNotFound`] / [`BootstrapError::BuildToolFailed`]
    pub async fn setup(&self, options: SetupOptions) -> Result<SetupSummary> {
        crate::status!("{}", format!("OS: {}", self.platform).green());
        tracing::info!("Setting up project in {}", self.paths.root.display());

        self.guard_removal(&self.paths.dependencies).await?;

        let scaffold = Scaffold::new(&self.paths);
        scaffold.write_main_source()?;
        scaffold.write_editor_config()?;

        ensure_dir(&self.paths.build)?;
        ensure_dir(&self.paths.dependencies)?;

        let dependencies = match &self.dependencies {
            Some(dependencies) => dependencies.clone(),
            None => self.platform.dependencies(options.with_imgui || self.config.with_imgui),
        };
        let fetcher = Fetcher::new(self.config.download_timeout())?;
        let fetch = fetcher.fetch_all(&dependencies, &self.paths.dependencies).await?;

        let sanitize = self.sanitize().await?;

        scaffold.write_cmake_lists()?;
        fetch.print_summary();

        let mut summary = SetupSummary {
            fetch,
            sanitize,
            executable_status: None,
        };

        if options.build {
            summary.executable_status = self.build(options.run).await?;
        }

        Ok(summary)
    }

    /// Write all three generated files without fetching or building.
    pub fn scaffold(&self) -> Result<()> {
        Scaffold::new(&self.paths).generate()?;
        Ok(())
    }

    /// Configure, build and optionally run the project.
    ///
    /// Returns the smoke-test exit status when the executable was run.
    pub async fn build(&self, run: bool) -> Result<Option<RunStatus>> {
        tracing::info!("Building in {}", self.paths.build.display());
        self.driver.configure_and_build(&self.paths.root, &self.paths.build).await?;
        crate::status!("{}", "Build succeeded".green().bold());

        if !run {
            return Ok(None);
        }

        let executable = self.platform.executable_path(&self.paths.build);
        let status = self.driver.run_executable(&executable, &self.paths.build).await?;
        Ok(Some(status))
    }

    /// Delete the dependency and build directories after confirmation.
    ///
    /// Returns `false` when there was nothing to delete.
    pub async fn clean(&self) -> Result<bool> {
        let existing: Vec<&Path> = [self.paths.dependencies.as_path(), self.paths.build.as_path()]
            .into_iter()
            .filter(|dir| dir.exists())
            .collect();

        if existing.is_empty() {
            crate::status!("Nothing to clean");
            return Ok(false);
        }

        for dir in existing {
            self.guard_removal(dir).await?;
        }
        Ok(true)
    }

    async fn sanitize(&self) -> Result<SanitizeReport> {
        let base = self.paths.dependencies.clone();
        let denylist = self.config.sanitize.clone();
        let report = tokio::task::spawn_blocking(move || sanitize_tree(&base, &denylist))
            .await
            .context("Sanitize task panicked")??;

        if report.total() > 0 {
            crate::status!(
                "{} Removed {} directories and {} files from dependencies",
                "✓".green(),
                report.removed_dirs.len(),
                report.removed_files.len()
            );
        }
        Ok(report)
    }

    /// Ask before recursively deleting `dir`; a missing directory needs no approval.
    async fn guard_removal(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        let message = format!(
            "Warning: This will delete the '{}' directory and all its contents. Do you want to proceed?",
            dir.display()
        );
        if !self.confirm.confirm(&message).await? {
            crate::status!("{}", format!("Aborted deletion of {}", dir.display()).yellow());
            return Err(BootstrapError::Aborted {
                path: dir.display().to_string(),
            }
            .into());
        }

        remove_dir_all(dir)?;
        crate::status!("Deleted: {}", dir.display());
        Ok(())
    }
}
