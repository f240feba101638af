//! Shared data models
//!
//! [`Dependency`] pairs a canonical library name with its source URL. The kind of
//! source (gzip tarball, zip, git repository) is never stored: it is derived from
//! the URL suffix through [`Dependency::source_kind`].
//!
//! [`ProjectPaths`] holds every directory the pipeline touches. It is computed once
//! from the project root and passed explicitly to each stage.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_BUILD_DIR, DEFAULT_DEPENDENCIES_DIR};

/// How a dependency is obtained, derived from its URL suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `.tar.gz` archive
    TarGz,
    /// `.zip` archive
    Zip,
    /// `.git` repository cloned with the system git
    Git,
}

impl SourceKind {
    /// Classify a URL by suffix. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if url.ends_with(".zip") {
            Some(Self::Zip)
        } else if url.ends_with(".git") {
            Some(Self::Git)
        } else {
            None
        }
    }

    /// The file suffix this kind is recognized by.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::TarGz => ".tar.gz",
            Self::Zip => ".zip",
            Self::Git => ".git",
        }
    }

    /// Whether this kind is downloaded and unpacked rather than cloned.
    #[must_use]
    pub const fn is_archive(self) -> bool {
        matches!(self, Self::TarGz | Self::Zip)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
            Self::Git => "git",
        };
        f.write_str(name)
    }
}

/// A third-party library to fetch into the dependency directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Canonical library name; also the directory name after setup
    pub name: String,
    /// Download or clone URL
    pub url: String,
}

impl Dependency {
    /// Create a dependency entry.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Source kind derived from the URL suffix, ignoring any query string.
    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        SourceKind::from_url(self.url_path())
    }

    /// Last path segment of the URL, used as the local archive file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        let path = self.url_path();
        path.rsplit('/').next().unwrap_or(path)
    }

    fn url_path(&self) -> &str {
        self.url.split(['?', '#']).next().unwrap_or(&self.url)
    }
}

/// Directories used by a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project root; generated files are written here
    pub root: PathBuf,
    /// Dependency directory, usually `<root>/dependencies`
    pub dependencies: PathBuf,
    /// Build directory, usually `<root>/build`
    pub build: PathBuf,
}

impl ProjectPaths {
    /// Paths with the default directory names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_dirs(root, DEFAULT_DEPENDENCIES_DIR, DEFAULT_BUILD_DIR)
    }

    /// Paths with custom dependency and build directory names under `root`.
    pub fn with_dirs(
        root: impl Into<PathBuf>,
        dependencies_dir: impl AsRef<Path>,
        build_dir: impl AsRef<Path>,
    ) -> Self {
        let root = root.into();
        Self {
            dependencies: root.join(dependencies_dir),
            build: root.join(build_dir),
            root,
        }
    }

    /// Directory a dependency ends up in.
    #[must_use]
    pub fn dependency_dir(&self, name: &str) -> PathBuf {
        self.dependencies.join(name)
    }
}
