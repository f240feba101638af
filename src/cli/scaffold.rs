//! Regenerate project files.

use anyhow::Result;
use clap::Args;

use super::{CliConfig, Confirmation, bootstrapper};

/// Write `CMakeLists.txt`, `main.cpp` and `.vscode/c_cpp_properties.json`,
/// overwriting existing files.
#[derive(Args)]
pub struct ScaffoldCommand {}

impl ScaffoldCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let boot = bootstrapper(config, Confirmation::from_flag(false)).await?;
        boot.scaffold()
    }
}
