//! Show the platform table.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::platform::Platform;

/// Print the detected platform and the dependencies `setup` would fetch.
#[derive(Args)]
pub struct PlatformCommand {
    /// Include the optional imgui and rlImGui repositories
    #[arg(long)]
    with_imgui: bool,
}

impl PlatformCommand {
    pub fn execute(self, _config: &CliConfig) -> Result<()> {
        let platform = Platform::detect()?;
        println!("{} {}", "Platform:".bold(), platform.to_string().green());

        for dependency in platform.dependencies(self.with_imgui) {
            let kind = dependency.source_kind().map_or_else(|| "unknown".to_string(), |k| k.to_string());
            println!("  {:<10} {:<7} {}", dependency.name, kind, dependency.url);
        }
        Ok(())
    }
}
