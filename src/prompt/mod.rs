//! Confirmation prompts for destructive actions
//!
//! Deleting an existing dependency or build directory always goes through a
//! [`Confirm`] provider. Only the literal answer `yes` (any case) approves; the
//! line terminator is stripped but any other whitespace is part of the answer.
//! `y`, ` yes`, an empty line or end of input all decline.

use anyhow::{Context, Result};
use colored::Colorize;
use std::future::Future;
use std::io::{self, BufRead, Write};

/// Asks the user to approve an action.
pub trait Confirm {
    /// Show `message` and return whether the user approved.
    fn confirm(&self, message: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Whether `answer` approves a destructive action.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("yes")
}

/// Prompt on stdout, answer read from one line of stdin.
///
/// Piped input is read like typed input; a closed stdin declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> impl Future<Output = Result<bool>> + Send {
        let message = message.to_string();
        async move {
            print!("{} ", format!("{message} (yes/no):").yellow());
            io::stdout().flush()?;

            // std's stdin buffer is process-wide, so consecutive prompts each get
            // their own line of piped input
            let response = tokio::task::spawn_blocking(|| {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line).map(|_| line)
            })
            .await
            .context("Prompt task panicked")??;
            Ok(is_affirmative(&response))
        }
    }
}

/// Approves everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, message: &str) -> impl Future<Output = Result<bool>> + Send {
        tracing::debug!("Assuming yes: {}", message);
        async { Ok(true) }
    }
}
