//! Supported host platforms and their dependency tables
//!
//! Each [`Platform`] maps to an immutable [`PlatformProfile`] describing what to
//! download and how the built executable is named. The tables are static; nothing
//! here touches the filesystem, which lets the resolver run (and fail) before any
//! directory is created or deleted.
//!
//! # Dependency Tables
//!
//! | Platform | raylib archive |
//! |----------|----------------|
//! | Linux    | `raylib-5.0_linux_amd64.tar.gz` |
//! | Windows  | `raylib-5.0_win64_msvc16.zip` |
//!
//! Both platforms also carry two optional git dependencies (`imgui`, `rlImGui`)
//! which are only included when explicitly requested.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::EXECUTABLE_NAME;
use crate::core::BootstrapError;
use crate::models::Dependency;

/// Prebuilt raylib release for Linux.
pub const RAYLIB_LINUX_URL: &str =
    "https://github.com/raysan5/raylib/releases/download/5.0/raylib-5.0_linux_amd64.tar.gz";

/// Prebuilt raylib release for Windows (MSVC).
pub const RAYLIB_WINDOWS_URL: &str =
    "https://github.com/raysan5/raylib/releases/download/5.0/raylib-5.0_win64_msvc16.zip";

/// Dear ImGui sources.
pub const IMGUI_URL: &str = "https://github.com/ocornut/imgui.git";

/// raylib backend for Dear ImGui.
pub const RLIMGUI_URL: &str = "https://github.com/raylib-extras/rlImGui.git";

/// Static description of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Display name, as reported to the user
    pub display_name: &'static str,
    /// Required archives as `(library, url)`
    pub archives: &'static [(&'static str, &'static str)],
    /// Optional git dependencies as `(library, url)`
    pub optional_repositories: &'static [(&'static str, &'static str)],
    /// Suffix of the built executable
    pub executable_suffix: &'static str,
    /// Subdirectory of the build directory holding the executable, if any
    pub executable_subdir: Option<&'static str>,
}

const OPTIONAL_REPOSITORIES: &[(&str, &str)] = &[("imgui", IMGUI_URL), ("rlImGui", RLIMGUI_URL)];

const LINUX: PlatformProfile = PlatformProfile {
    display_name: "Linux",
    archives: &[("raylib", RAYLIB_LINUX_URL)],
    optional_repositories: OPTIONAL_REPOSITORIES,
    executable_suffix: "",
    executable_subdir: None,
};

// Visual Studio generators are multi-config and default to Debug.
const WINDOWS: PlatformProfile = PlatformProfile {
    display_name: "Windows",
    archives: &[("raylib", RAYLIB_WINDOWS_URL)],
    optional_repositories: OPTIONAL_REPOSITORIES,
    executable_suffix: ".exe",
    executable_subdir: Some("Debug"),
};

/// A host operating system rayboot knows how to bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux (x86_64 prebuilt archive)
    Linux,
    /// Windows (MSVC prebuilt archive)
    Windows,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Self; 2] = [Self::Linux, Self::Windows];

    /// Detect the host platform.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::UnsupportedPlatform`] when the host OS has no
    /// dependency table.
    pub fn detect() -> Result<Self, BootstrapError> {
        let os = std::env::consts::OS;
        Self::from_os_name(os).ok_or_else(|| BootstrapError::UnsupportedPlatform {
            os: os.to_string(),
        })
    }

    /// Resolve an OS identifier, case-insensitively.
    ///
    /// Accepts both Rust's `std::env::consts::OS` values (`"linux"`, `"windows"`) and
    /// capitalized system names (`"Linux"`, `"Windows"`).
    #[must_use]
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => Some(Self::Linux),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Static profile of this platform.
    #[must_use]
    pub const fn profile(self) -> &'static PlatformProfile {
        match self {
            Self::Linux => &LINUX,
            Self::Windows => &WINDOWS,
        }
    }

    /// Dependencies to fetch, in table order.
    ///
    /// Archives always come first; the optional git repositories are appended when
    /// `with_optional` is set.
    #[must_use]
    pub fn dependencies(self, with_optional: bool) -> Vec<Dependency> {
        let profile = self.profile();
        let optional: &[(&str, &str)] = if with_optional {
            profile.optional_repositories
        } else {
            &[]
        };

        profile
            .archives
            .iter()
            .chain(optional)
            .map(|(name, url)| Dependency::new(*name, *url))
            .collect()
    }

    /// Location of the executable produced by the generated build configuration.
    #[must_use]
    pub fn executable_path(self, build_dir: &Path) -> PathBuf {
        let profile = self.profile();
        let file_name = format!("{EXECUTABLE_NAME}{}", profile.executable_suffix);
        match profile.executable_subdir {
            Some(subdir) => build_dir.join(subdir).join(file_name),
            None => build_dir.join(file_name),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().display_name)
    }
}
