//! Platform-specific helpers
//!
//! Small functions that hide the differences between Windows and Unix-like hosts:
//! executable lookup, the git binary name, and path separators for generated files.

use std::path::Path;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the git command name for the current platform.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if cfg!(windows) {
        "git.exe"
    } else {
        "git"
    }
}

/// Checks whether a command is available in `PATH` (or is an existing path).
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Converts every separator to a forward slash.
///
/// CMake treats backslashes as escape characters, so paths written into generated
/// build files always use `/`.
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}
