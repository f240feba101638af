//! Global constants used throughout rayboot.
//!
//! Directory names, denylists, timeouts and the names of generated files live here
//! so the pipeline stages agree on them.

use std::time::Duration;

/// Default name of the directory holding fetched libraries.
pub const DEFAULT_DEPENDENCIES_DIR: &str = "dependencies";

/// Default name of the build output directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default external build tool.
pub const DEFAULT_BUILD_TOOL: &str = "cmake";

/// Default per-download timeout (5 minutes).
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Connect timeout for HTTP downloads.
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for `git clone` of auxiliary libraries.
pub const GIT_CLONE_TIMEOUT: Duration = Duration::from_secs(120);

/// Folder names removed from fetched dependencies.
pub const DENYLISTED_FOLDERS: &[&str] = &[".github", "docs", "examples"];

/// File names removed from fetched dependencies.
pub const DENYLISTED_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "README.md", "CHANGELOG"];

/// Name of the CMake target produced by the generated build configuration.
pub const EXECUTABLE_NAME: &str = "MyExecutable";

/// Generated build configuration file.
pub const CMAKE_LISTS_FILE: &str = "CMakeLists.txt";

/// Generated smoke-test program.
pub const MAIN_SOURCE_FILE: &str = "main.cpp";

/// Editor configuration directory.
pub const VSCODE_DIR: &str = ".vscode";

/// Generated editor configuration file inside [`VSCODE_DIR`].
pub const C_CPP_PROPERTIES_FILE: &str = "c_cpp_properties.json";

/// Project configuration file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "rayboot.toml";

/// Environment variable that disables progress bars.
pub const NO_PROGRESS_ENV: &str = "RAYBOOT_NO_PROGRESS";

/// Environment variable that overrides the build tool.
pub const BUILD_TOOL_ENV: &str = "RAYBOOT_BUILD_TOOL";

/// User agent sent with every download.
pub const USER_AGENT: &str = concat!("rayboot/", env!("CARGO_PKG_VERSION"));
