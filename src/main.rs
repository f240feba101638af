//! rayboot CLI entry point
//!
//! Parses the command line, runs the command and turns any error into a colored
//! message with a suggestion. The process exit code comes from
//! [`BootstrapError::exit_code`](rayboot::core::BootstrapError::exit_code): a
//! failed configure or build step exits with the build tool's own code, every
//! other failure with 1.

use clap::Parser;
use rayboot::cli;
use rayboot::core::user_friendly_error;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute().await {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(error_ctx.error.exit_code());
    }
}
