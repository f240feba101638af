//! Configure, build and run.

use anyhow::Result;
use clap::Args;

use super::{CliConfig, Confirmation, bootstrapper};

/// Run `<tool> ..` and `<tool> --build .` in the build directory, then the
/// executable.
#[derive(Args)]
pub struct BuildCommand {
    /// Do not run the executable after building
    #[arg(long)]
    no_run: bool,
}

impl BuildCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let boot = bootstrapper(config, Confirmation::from_flag(false)).await?;
        boot.build(!self.no_run).await?;
        Ok(())
    }
}
