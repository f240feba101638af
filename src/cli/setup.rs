//! Full bootstrap pipeline.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{CliConfig, Confirmation, bootstrapper};
use crate::workflow::SetupOptions;

/// Fetch raylib, scaffold the project, build and run it.
///
/// An existing dependency directory is deleted first, after confirmation.
#[derive(Args)]
pub struct SetupCommand {
    /// Delete an existing dependency directory without asking
    #[arg(short, long)]
    yes: bool,

    /// Stop after writing the project files
    #[arg(long)]
    no_build: bool,

    /// Build but do not run the executable
    #[arg(long)]
    no_run: bool,

    /// Also clone Dear ImGui and rlImGui
    #[arg(long)]
    with_imgui: bool,
}

impl SetupCommand {
    /// Pipeline switches. `with_imgui` from the configuration file is applied
    /// by the pipeline itself.
    pub(super) const fn options(&self) -> SetupOptions {
        SetupOptions {
            with_imgui: self.with_imgui,
            build: !self.no_build,
            run: !self.no_run,
        }
    }

    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let boot = bootstrapper(config, Confirmation::from_flag(self.yes)).await?;
        let summary = boot.setup(self.options()).await?;

        if !summary.fetch.is_success() {
            println!(
                "{}",
                "Some dependencies could not be fetched; the build may be incomplete.".yellow()
            );
        }
        crate::status!("\n{}", "Setup complete!".green().bold());
        Ok(())
    }
}
