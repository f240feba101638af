//! Dependency fetching
//!
//! Every dependency in a platform table is fetched in order, one at a time:
//!
//! - **Archives** (`.tar.gz`, `.zip`) are downloaded into the dependency directory,
//!   extracted there, renamed to the canonical library name and deleted.
//! - **Git repositories** (`.git`) are cloned straight into `<deps>/<library>`.
//!
//! Fetching is best-effort. A failing dependency is logged, reported with a red
//! status line and recorded in the [`FetchReport`]; the remaining dependencies are
//! still processed. Nothing is retried.
//!
//! # Rename Caveat
//!
//! When `<deps>/<library>` already exists the freshly extracted directory keeps its
//! original name and the existing directory is left untouched. This is reported as
//! an install without rename, not as a failure.

pub mod archive;
pub mod download;

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::BootstrapError;
use crate::git;
use crate::models::{Dependency, SourceKind};
use crate::utils::ensure_dir;

pub use archive::extract_archive;
pub use download::Downloader;

/// What happened to one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Archive downloaded and extracted
    Installed {
        /// Directory holding the extracted library
        path: PathBuf,
        /// Whether the extracted directory was renamed to the library name
        renamed: bool,
    },
    /// Repository cloned
    Cloned {
        /// Clone destination
        path: PathBuf,
    },
    /// Not fetched because the source kind is unknown
    Skipped {
        /// Why the dependency was skipped
        reason: String,
    },
    /// Fetch failed; the pipeline carried on
    Failed {
        /// Failure description including the error chain
        reason: String,
    },
}

impl FetchOutcome {
    /// Whether the dependency ended up on disk.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Installed { .. } | Self::Cloned { .. })
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed {
                path,
                renamed: true,
            } => write!(f, "installed into {}", path.display()),
            Self::Installed {
                path,
                renamed: false,
            } => write!(f, "extracted into {} (not renamed)", path.display()),
            Self::Cloned {
                path,
            } => write!(f, "cloned into {}", path.display()),
            Self::Skipped {
                reason,
            } => write!(f, "skipped: {reason}"),
            Self::Failed {
                reason,
            } => write!(f, "failed: {reason}"),
        }
    }
}

/// Ordered outcomes of a fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    entries: Vec<(String, FetchOutcome)>,
}

impl FetchReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `library`.
    pub fn push(&mut self, library: impl Into<String>, outcome: FetchOutcome) {
        self.entries.push((library.into(), outcome));
    }

    /// All outcomes in fetch order.
    #[must_use]
    pub fn entries(&self) -> &[(String, FetchOutcome)] {
        &self.entries
    }

    /// Outcome for `library`, if it was fetched.
    #[must_use]
    pub fn outcome(&self, library: &str) -> Option<&FetchOutcome> {
        self.entries.iter().find(|(name, _)| name == library).map(|(_, outcome)| outcome)
    }

    /// Libraries that failed or were skipped.
    pub fn failures(&self) -> impl Iterator<Item = &(String, FetchOutcome)> {
        self.entries.iter().filter(|(_, outcome)| !outcome.is_success())
    }

    /// True when every dependency ended up on disk.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Print a one-line-per-dependency summary.
    pub fn print_summary(&self) {
        if self.entries.is_empty() {
            return;
        }

        let ok = self.entries.len() - self.failures().count();
        let header = format!("Fetched {ok}/{} dependencies", self.entries.len());
        if self.is_success() {
            crate::status!("\n{}", header.green().bold());
        } else {
            crate::status!("\n{}", header.yellow().bold());
        }

        for (library, outcome) in &self.entries {
            if outcome.is_success() {
                crate::status!("  {} {library}: {outcome}", "✓".green());
            } else {
                println!("  {} {library}: {outcome}", "✗".red());
            }
        }
    }
}

/// Fetches dependencies into a dependency directory.
#[derive(Debug, Clone)]
pub struct Fetcher {
    downloader: Downloader,
}

impl Fetcher {
    /// Fetcher whose downloads time out after `download_timeout`.
    pub fn new(download_timeout: Duration) -> Result<Self> {
        Ok(Self {
            downloader: Downloader::new(download_timeout)?,
        })
    }

    /// Fetch every dependency into `dependencies_dir`, in order.
    ///
    /// Per-dependency failures are recorded in the report. Only a failure to create
    /// the dependency directory itself is returned as an error.
    pub async fn fetch_all(&self, dependencies: &[Dependency], dependencies_dir: &Path) -> Result<FetchReport> {
        ensure_dir(dependencies_dir)?;

        let mut report = FetchReport::new();
        for dependency in dependencies {
            let outcome = match self.fetch_one(dependency, dependencies_dir).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let reason = format!("{e:#}");
                    tracing::warn!("Failed to fetch {}: {}", dependency.name, reason);
                    FetchOutcome::Failed {
                        reason,
                    }
                }
            };

            match &outcome {
                FetchOutcome::Installed { .. } | FetchOutcome::Cloned { .. } => {
                    crate::status!("{} {} {}", "✓".green(), dependency.name.bold(), outcome);
                }
                FetchOutcome::Skipped { .. } => {
                    tracing::warn!("Skipping {}: {}", dependency.name, outcome);
                    crate::status!("{} {} {}", "!".yellow(), dependency.name.bold(), outcome);
                }
                FetchOutcome::Failed { .. } => {
                    println!("{} {} {}", "✗".red(), dependency.name.bold(), outcome.to_string().red());
                }
            }

            report.push(dependency.name.clone(), outcome);
        }

        Ok(report)
    }

    /// Fetch a single dependency.
    ///
    /// # Errors
    ///
    /// Download, extraction and clone errors are returned as-is; an unrecognized
    /// URL suffix is not an error but a [`FetchOutcome::Skipped`].
    pub async fn fetch_one(&self, dependency: &Dependency, dependencies_dir: &Path) -> Result<FetchOutcome> {
        let Some(kind) = dependency.source_kind() else {
            return Ok(FetchOutcome::Skipped {
                reason: BootstrapError::UnsupportedSource {
                    url: dependency.url.clone(),
                }
                .to_string(),
            });
        };

        tracing::info!("Fetching {} ({}) from {}", dependency.name, kind, dependency.url);

        if kind == SourceKind::Git {
            let target = dependencies_dir.join(&dependency.name);
            let path = git::clone_repository(&dependency.url, &target).await?;
            return Ok(FetchOutcome::Cloned {
                path,
            });
        }

        let archive_path = dependencies_dir.join(dependency.file_name());
        self.downloader.download(&dependency.url, &archive_path).await?;

        let library = dependency.name.clone();
        let destination = dependencies_dir.to_path_buf();
        tokio::task::spawn_blocking(move || {
            install_downloaded_archive(&archive_path, kind, &destination, &library)
        })
        .await
        .context("Extraction task panicked")?
    }
}

/// Extract a downloaded archive, rename its top-level directory to `library` and
/// delete the archive.
///
/// The archive is deleted only after a successful extraction; a corrupt archive is
/// left in place for inspection.
pub fn install_downloaded_archive(
    archive_path: &Path,
    kind: SourceKind,
    destination: &Path,
    library: &str,
) -> Result<FetchOutcome> {
    let top_level_dir = extract_archive(archive_path, kind, destination)?;

    let extracted_dir = destination.join(&top_level_dir);
    let target = destination.join(library);

    let (path, renamed) = if extracted_dir == target {
        (target, true)
    } else if !extracted_dir.is_dir() {
        tracing::warn!(
            "{} has no top-level directory; its contents were extracted into {}",
            archive_path.display(),
            destination.display()
        );
        (destination.to_path_buf(), false)
    } else if target.exists() {
        tracing::warn!(
            "{} already exists; leaving extracted directory {} in place",
            target.display(),
            extracted_dir.display()
        );
        (extracted_dir, false)
    } else {
        std::fs::rename(&extracted_dir, &target).map_err(|e| BootstrapError::FileSystemError {
            operation: format!("rename {top_level_dir} to {library}: {e}"),
            path: extracted_dir.display().to_string(),
        })?;
        tracing::debug!("Renamed {} to {}", extracted_dir.display(), target.display());
        (target, true)
    };

    std::fs::remove_file(archive_path)
        .with_context(|| format!("Failed to delete archive {}", archive_path.display()))?;

    Ok(FetchOutcome::Installed {
        path,
        renamed,
    })
}
