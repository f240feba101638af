//! Build driver
//!
//! Drives the external build tool from the build directory:
//!
//! 1. `<tool> <source>` (configure against the project root, `..` for the default
//!    one-level build directory)
//! 2. `<tool> --build .`
//! 3. the produced executable, as a smoke test
//!
//! Every subprocess gets the build directory as an explicit working directory; the
//! process-wide current directory is never changed. Processes are launched through
//! [`CommandRunner`] so the sequence can be observed without a real toolchain.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use crate::core::BootstrapError;
use crate::utils::{ensure_dir, normalize_path_for_storage};

/// A subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub current_dir: PathBuf,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I, current_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: current_dir.into(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    #[must_use]
    pub const fn success() -> Self {
        Self {
            code: Some(0),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Launches subprocesses and waits for them.
pub trait CommandRunner {
    /// Run `command` to completion with inherited stdio.
    ///
    /// A program that cannot be spawned surfaces as an [`std::io::Error`] in the
    /// error chain.
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<RunStatus>> + Send;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl CommandRunner for TokioRunner {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<RunStatus>> + Send {
        let command = command.clone();
        async move {
            tracing::debug!("Running `{}` in {}", command, command.current_dir.display());
            let status = tokio::process::Command::new(&command.program)
                .args(&command.args)
                .current_dir(&command.current_dir)
                .status()
                .await
                .with_context(|| format!("Failed to launch `{command}`"))?;
            Ok(RunStatus {
                code: status.code(),
            })
        }
    }
}

/// The two build tool invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// `<tool> <source>`
    Configure,
    /// `<tool> --build .`
    Build,
}

impl BuildStep {
    fn args(self, source_dir: &Path, build_dir: &Path) -> Vec<String> {
        match self {
            Self::Configure => vec![source_arg(source_dir, build_dir)],
            Self::Build => vec!["--build".to_string(), ".".to_string()],
        }
    }
}

/// Path of `source_dir` as seen from `build_dir`.
///
/// A build directory nested below the source gets one `..` per level; anything
/// else gets the source path itself.
fn source_arg(source_dir: &Path, build_dir: &Path) -> String {
    let depth = build_dir.strip_prefix(source_dir).ok().and_then(|relative| {
        let mut depth = 0;
        for component in relative.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                _ => return None,
            }
        }
        (depth > 0).then_some(depth)
    });

    match depth {
        Some(depth) => vec![".."; depth].join("/"),
        None => normalize_path_for_storage(source_dir),
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configure => "configure",
            Self::Build => "build",
        })
    }
}

/// Configures, builds and runs a scaffolded project.
#[derive(Debug, Clone)]
pub struct BuildDriver<R> {
    runner: R,
    tool: String,
}

impl<R: CommandRunner> BuildDriver<R> {
    pub fn new(runner: R, tool: impl Into<String>) -> Self {
        Self {
            runner,
            tool: tool.into(),
        }
    }

    /// The underlying runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Configure `source_dir` into `build_dir` and build, creating `build_dir` if
    /// absent.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::BuildToolNotFound`] if the tool cannot be launched
    /// - [`BootstrapError::BuildToolFailed`] on a non-zero exit of either step
    pub async fn configure_and_build(&self, source_dir: &Path, build_dir: &Path) -> Result<()> {
        ensure_dir(build_dir)?;
        self.run_step(BuildStep::Configure, source_dir, build_dir).await?;
        self.run_step(BuildStep::Build, source_dir, build_dir).await
    }

    /// Run a single build step in `build_dir`.
    pub async fn run_step(&self, step: BuildStep, source_dir: &Path, build_dir: &Path) -> Result<()> {
        let command = CommandSpec::new(&self.tool, step.args(source_dir, build_dir), build_dir);
        tracing::info!("Build {} step: {}", step, command);
        crate::status!("{} {}", "→".cyan(), command);

        let status = self.runner.run(&command).await.map_err(|e| {
            if is_not_found(&e) {
                BootstrapError::BuildToolNotFound {
                    tool: self.tool.clone(),
                }
                .into()
            } else {
                e
            }
        })?;

        if !status.is_success() {
            return Err(BootstrapError::BuildToolFailed {
                step: step.to_string(),
                code: status.code,
            }
            .into());
        }
        Ok(())
    }

    /// Run the built executable from `build_dir`.
    ///
    /// A non-zero exit is only logged; the build itself succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ExecutableNotFound`] if `executable` does not exist.
    pub async fn run_executable(&self, executable: &Path, build_dir: &Path) -> Result<RunStatus> {
        if !executable.is_file() {
            return Err(BootstrapError::ExecutableNotFound {
                path: executable.display().to_string(),
            }
            .into());
        }

        let command = CommandSpec::new(executable.display().to_string(), Vec::<String>::new(), build_dir);
        tracing::info!("Running {}", executable.display());
        crate::status!("{} {}", "→".cyan(), command);

        let status = self.runner.run(&command).await?;
        if !status.is_success() {
            let code = status.code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            tracing::warn!("{} exited with {}", executable.display(), code);
            println!("{}", format!("⚠ {} exited with {code}", executable.display()).yellow());
        }
        Ok(status)
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == std::io::ErrorKind::NotFound)
}
