//! Git operations wrapper
//!
//! Cloning uses the system `git` binary rather than an embedded implementation, so
//! the user's credential helpers, proxies and SSH configuration apply unchanged.
//! Only `clone` is needed: auxiliary libraries are cloned once into the dependency
//! directory and never updated in place.

pub mod command_builder;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::core::BootstrapError;
use crate::utils::platform::{command_exists, get_git_command};

pub use command_builder::GitCommand;

/// Checks if git is available on the system.
#[must_use]
pub fn is_git_installed() -> bool {
    command_exists(get_git_command())
}

/// Fails with [`BootstrapError::GitNotFound`] when git is unavailable.
pub fn ensure_git_available() -> Result<()> {
    if !is_git_installed() {
        return Err(BootstrapError::GitNotFound.into());
    }
    Ok(())
}

/// Clone `url` into `target`.
///
/// # Errors
///
/// Returns [`BootstrapError::GitNotFound`] or [`BootstrapError::GitCloneFailed`].
pub async fn clone_repository(url: &str, target: &Path) -> Result<PathBuf> {
    ensure_git_available()?;
    GitCommand::clone(url, target).execute().await?;
    tracing::info!("Cloned {} into {}", url, target.display());
    Ok(target.to_path_buf())
}
