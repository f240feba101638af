//! Command-line interface for rayboot.
//!
//! # Available Commands
//!
//! - `setup` - Full pipeline: guard, fetch, sanitize, scaffold, build, run
//! - `scaffold` - (Re)write `CMakeLists.txt`, `main.cpp` and the editor config
//! - `build` - Configure, build and run an already scaffolded project
//! - `clean` - Delete the dependency and build directories
//! - `platform` - Show the detected platform and its dependency table
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only print errors, failed dependencies and prompts
//! - `--no-progress` - Disable progress bars and spinners
//! - `--config` - Path to a configuration file
//! - `--project` - Project root (defaults to the current directory)
//!
//! # Example
//!
//! ```bash
//! # Bootstrap a new raylib project in the current directory
//! rayboot setup
//!
//! # Same, non-interactively and with Dear ImGui
//! rayboot setup --yes --with-imgui
//!
//! # Rebuild after editing main.cpp
//! rayboot build
//! ```

mod build;
mod clean;
mod platform;
mod scaffold;
mod setup;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::build::TokioRunner;
use crate::config::BootstrapConfig;
use crate::platform::Platform;
use crate::prompt::{AssumeYes, Confirm, StdinConfirm};
use crate::utils::output::set_quiet;
use crate::utils::progress::set_progress_disabled;
use crate::workflow::Bootstrapper;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: &'static str,

    /// Hide status lines
    pub quiet: bool,

    /// Hide progress bars
    pub no_progress: bool,

    /// Explicit configuration file
    pub config_path: Option<PathBuf>,

    /// Project root override
    pub project: Option<PathBuf>,
}

impl CliConfig {
    /// Install the tracing subscriber. `RUST_LOG` takes precedence over the flags.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("rayboot={}", self.log_level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Apply process-wide settings once at startup.
    pub fn apply(&self) {
        if self.no_progress {
            set_progress_disabled(true);
        }
        if self.quiet {
            set_quiet(true);
        }
    }

    /// Project root: `--project` or the current directory.
    pub fn project_root(&self) -> Result<PathBuf> {
        match self.project {
            Some(ref dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to determine the current directory"),
        }
    }

    /// Load configuration for `project_root`.
    pub async fn load_config(&self, project_root: &Path) -> Result<BootstrapConfig> {
        BootstrapConfig::load(self.config_path.as_deref(), project_root).await
    }
}

#[derive(Parser)]
#[command(
    name = "rayboot",
    about = "Bootstrap a raylib project - fetch the library, scaffold a CMake project, build and run it",
    version,
    long_about = "rayboot downloads a prebuilt raylib release for the host platform, strips it of \
                  documentation and samples, generates CMakeLists.txt, main.cpp and a VS Code \
                  configuration, then configures, builds and runs the project with CMake."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors, failed dependencies and prompts
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file (defaults to <project>/rayboot.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project root directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    /// Disable progress bars and spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch dependencies, scaffold the project, build and run it
    Setup(setup::SetupCommand),

    /// Write CMakeLists.txt, main.cpp and .vscode/c_cpp_properties.json
    Scaffold(scaffold::ScaffoldCommand),

    /// Configure and build the project, then run the executable
    Build(build::BuildCommand),

    /// Delete the dependency and build directories
    Clean(clean::CleanCommand),

    /// Show the detected platform and its dependency table
    Platform(platform::PlatformCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Derive [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
            project: self.project.clone(),
        }
    }

    /// Execute with an explicit configuration (no logging setup).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();

        match self.command {
            Commands::Setup(cmd) => cmd.execute(&config).await,
            Commands::Scaffold(cmd) => cmd.execute(&config).await,
            Commands::Build(cmd) => cmd.execute(&config).await,
            Commands::Clean(cmd) => cmd.execute(&config).await,
            Commands::Platform(cmd) => cmd.execute(&config),
        }
    }
}

/// Resolve the platform, load configuration and assemble a [`Bootstrapper`].
///
/// The platform is resolved first so an unsupported host fails before the
/// configuration is read or any directory is touched.
async fn bootstrapper<C: Confirm>(config: &CliConfig, confirm: C) -> Result<Bootstrapper<C, TokioRunner>> {
    let platform = Platform::detect()?;
    let root = config.project_root()?;
    let settings = config.load_config(&root).await?;
    tracing::debug!("Project root: {}, platform: {}", root.display(), platform);
    Ok(Bootstrapper::new(settings, &root, platform, confirm, TokioRunner))
}

/// Confirmation provider for the `--yes` flag.
enum Confirmation {
    Assume(AssumeYes),
    Ask(StdinConfirm),
}

impl Confirmation {
    const fn from_flag(yes: bool) -> Self {
        if yes {
            Self::Assume(AssumeYes)
        } else {
            Self::Ask(StdinConfirm)
        }
    }
}

impl Confirm for Confirmation {
    async fn confirm(&self, message: &str) -> Result<bool> {
        match self {
            Self::Assume(inner) => inner.confirm(message).await,
            Self::Ask(inner) => inner.confirm(message).await,
        }
    }
}
