//! Dependency tree sanitizing
//!
//! Release archives and repositories ship documentation, CI configuration and
//! sample programs that a game project never needs. After fetching, the dependency
//! directory is walked once and every entry whose name is on a denylist is removed:
//!
//! - directories named in [`SanitizeConfig::folders`] are deleted with all their
//!   contents and not descended into
//! - files named in [`SanitizeConfig::files`] are deleted
//!
//! Names are compared exactly (case-sensitive) against the entry's file name,
//! at any depth below the base directory. The base directory itself is never
//! removed.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SanitizeConfig;

/// Entries removed by [`sanitize_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Directories deleted with their contents
    pub removed_dirs: Vec<PathBuf>,
    /// Files deleted
    pub removed_files: Vec<PathBuf>,
}

impl SanitizeReport {
    /// Total number of removed entries.
    #[must_use]
    pub fn total(&self) -> usize {
        self.removed_dirs.len() + self.removed_files.len()
    }
}

/// Remove denylisted folders and files below `base`.
///
/// A missing `base` yields an empty report.
pub fn sanitize_tree(base: &Path, denylist: &SanitizeConfig) -> Result<SanitizeReport> {
    let mut report = SanitizeReport::default();
    if !base.is_dir() {
        tracing::debug!("Nothing to sanitize: {} does not exist", base.display());
        return Ok(report);
    }

    let is_listed = |names: &[String], entry: &walkdir::DirEntry| {
        let name = entry.file_name().to_string_lossy();
        names.iter().any(|n| *n == name)
    };

    let mut walker = WalkDir::new(base).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("Failed to walk {}", base.display()))?;
        let path = entry.path().to_path_buf();

        if entry.file_type().is_dir() {
            if is_listed(&denylist.folders, &entry) {
                walker.skip_current_dir();
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove directory {}", path.display()))?;
                tracing::info!("Removed directory {}", path.display());
                report.removed_dirs.push(path);
            }
        } else if is_listed(&denylist.files, &entry) {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file {}", path.display()))?;
            tracing::info!("Removed file {}", path.display());
            report.removed_files.push(path);
        }
    }

    Ok(report)
}
