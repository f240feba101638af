//! Remove generated directories.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{CliConfig, Confirmation, bootstrapper};

/// Delete the dependency and build directories.
///
/// Each existing directory is confirmed separately unless `--yes` is given.
/// Generated source files are kept.
#[derive(Args)]
pub struct CleanCommand {
    /// Delete without asking
    #[arg(short, long)]
    yes: bool,
}

impl CleanCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let boot = bootstrapper(config, Confirmation::from_flag(self.yes)).await?;
        if boot.clean().await? {
            crate::status!("{}", "Clean complete".green());
        }
        Ok(())
    }
}
