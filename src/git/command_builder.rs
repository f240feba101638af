//! Git command builder
//!
//! Git is only ever asked to clone. [`GitCommand`] keeps the argument list, the
//! timeout and the URL used in error messages together so that logging and error
//! mapping live in one place.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::GIT_CLONE_TIMEOUT;
use crate::core::BootstrapError;
use crate::utils::platform::get_git_command;

/// A `git clone` invocation.
pub struct GitCommand {
    /// Arguments passed to git (e.g., ["clone", "--progress", "url", "path"])
    args: Vec<String>,

    /// Maximum duration to wait for the clone
    timeout_duration: Duration,

    /// Repository URL for error messages
    url: String,
}

impl GitCommand {
    /// `git clone --progress <url> <target>` with the default clone timeout.
    pub fn clone(url: &str, target: impl AsRef<Path>) -> Self {
        Self {
            args: vec![
                "clone".to_string(),
                "--progress".to_string(),
                url.to_string(),
                target.as_ref().display().to_string(),
            ],
            timeout_duration: GIT_CLONE_TIMEOUT,
            url: url.to_string(),
        }
    }

    /// Run the clone to completion.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::GitNotFound`] if git cannot be spawned
    /// - [`BootstrapError::GitCloneFailed`] if git exits non-zero or times out
    pub async fn execute(self) -> Result<()> {
        let git_command = get_git_command();
        let joined = self.args.join(" ");

        tracing::debug!(target: "git", "Executing command: {} {}", git_command, joined);

        let mut cmd = Command::new(git_command);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("GIT_TERMINAL_PROMPT", "0");

        let Ok(output) = timeout(self.timeout_duration, cmd.output()).await else {
            let secs = self.timeout_duration.as_secs();
            tracing::warn!(target: "git", "Command timed out after {} seconds: git {}", secs, joined);
            return Err(self.failure(format!("git clone timed out after {secs} seconds")).into());
        };

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BootstrapError::GitNotFound.into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to execute git {joined}"));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            tracing::debug!(target: "git", "Command failed with exit code: {:?}", output.status.code());
            return Err(self.failure(stderr.trim().to_string()).into());
        }

        if !stderr.is_empty() {
            tracing::debug!(target: "git", "{}", stderr.trim());
        }
        Ok(())
    }

    fn failure(&self, reason: String) -> BootstrapError {
        BootstrapError::GitCloneFailed {
            url: self.url.clone(),
            reason,
        }
    }
}
