//! Archive extraction
//!
//! Two formats are supported: gzip-compressed tarballs and zip files. Both
//! extractors refuse entries that would land outside the destination directory and
//! report the top-level directory the archive unpacked into, so the caller can
//! rename it to the canonical library name.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path};

use crate::core::BootstrapError;
use crate::models::SourceKind;

/// Tracks the first path component of every entry.
#[derive(Default)]
struct RootTracker {
    roots: BTreeSet<String>,
    has_root_file: bool,
}

impl RootTracker {
    fn record(&mut self, path: &Path, is_dir: bool) {
        let mut components = path.components().filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        });
        let Some(first) = components.next() else {
            return;
        };
        if components.next().is_none() && !is_dir {
            self.has_root_file = true;
        }
        self.roots.insert(first);
    }

    /// The single shared root directory, if the archive has one.
    fn single_root(&self) -> Option<String> {
        if self.has_root_file || self.roots.len() != 1 {
            return None;
        }
        self.roots.iter().next().cloned()
    }
}

/// Archive file name without its archive suffix.
///
/// `raylib-5.0_linux_amd64.tar.gz` becomes `raylib-5.0_linux_amd64`.
fn strip_archive_suffix(file_name: &str) -> &str {
    [SourceKind::TarGz, SourceKind::Zip]
        .iter()
        .find_map(|kind| file_name.strip_suffix(kind.suffix()))
        .unwrap_or(file_name)
}

/// Extract `archive` into `destination` and return the top-level directory name.
///
/// The name is the single directory every entry shares (relative to
/// `destination`); when entries are spread over several roots it falls back to
/// the archive file name without its suffix.
///
/// # Errors
///
/// - [`BootstrapError::ExtractionFailed`] for unreadable or corrupt archives
/// - [`BootstrapError::UnsafeArchiveEntry`] for entries escaping `destination`
pub fn extract_archive(archive: &Path, kind: SourceKind, destination: &Path) -> Result<String> {
    let archive_name = archive
        .file_name()
        .map_or_else(|| archive.display().to_string(), |n| n.to_string_lossy().into_owned());

    let (tracker, entries) = match kind {
        SourceKind::TarGz => extract_tar_gz(archive, &archive_name, destination)?,
        SourceKind::Zip => extract_zip(archive, &archive_name, destination)?,
        SourceKind::Git => {
            return Err(BootstrapError::ExtractionFailed {
                archive: archive_name,
                reason: "git sources are cloned, not extracted".to_string(),
            }
            .into());
        }
    };

    let top_level_dir =
        tracker.single_root().unwrap_or_else(|| strip_archive_suffix(&archive_name).to_string());

    tracing::debug!(
        "Extracted {} entries from {} (top-level directory: {})",
        entries,
        archive_name,
        top_level_dir
    );

    Ok(top_level_dir)
}

fn extraction_failed(archive_name: &str, error: impl std::fmt::Display) -> BootstrapError {
    BootstrapError::ExtractionFailed {
        archive: archive_name.to_string(),
        reason: error.to_string(),
    }
}

fn extract_tar_gz(archive: &Path, archive_name: &str, destination: &Path) -> Result<(RootTracker, usize)> {
    let file = fs::File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;

    let decoder = flate2::read::GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);
    tar.set_preserve_permissions(true);

    let mut tracker = RootTracker::default();
    let mut count = 0;

    for entry_result in tar.entries().map_err(|e| extraction_failed(archive_name, e))? {
        let mut entry = entry_result.map_err(|e| extraction_failed(archive_name, e))?;
        let entry_type = entry.header().entry_type();
        if matches!(entry_type, tar::EntryType::XGlobalHeader | tar::EntryType::XHeader) {
            continue;
        }

        let entry_path = entry.path().map_err(|e| extraction_failed(archive_name, e))?.into_owned();

        let unpacked = entry.unpack_in(destination).map_err(|e| extraction_failed(archive_name, e))?;
        if !unpacked {
            return Err(BootstrapError::UnsafeArchiveEntry {
                archive: archive_name.to_string(),
                entry: entry_path.display().to_string(),
            }
            .into());
        }

        tracker.record(&entry_path, entry_type.is_dir());
        count += 1;
    }

    Ok((tracker, count))
}

fn extract_zip(archive: &Path, archive_name: &str, destination: &Path) -> Result<(RootTracker, usize)> {
    let file = fs::File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;

    let mut zip = zip::ZipArchive::new(file).map_err(|e| extraction_failed(archive_name, e))?;

    let mut tracker = RootTracker::default();
    let mut count = 0;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| extraction_failed(archive_name, e))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(BootstrapError::UnsafeArchiveEntry {
                archive: archive_name.to_string(),
                entry: entry.name().to_string(),
            }
            .into());
        };
        let target = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            let mut out = fs::File::create(&target)
                .with_context(|| format!("Failed to create extracted file: {}", target.display()))?;
            io::copy(&mut entry, &mut out).map_err(|e| extraction_failed(archive_name, e))?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                    .with_context(|| format!("Failed to set permissions on {}", target.display()))?;
            }
        }

        tracker.record(&relative, entry.is_dir());
        count += 1;
    }

    Ok((tracker, count))
}
