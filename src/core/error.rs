//! Error handling for rayboot
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`BootstrapError`]) for every failure the pipeline
//!    knows how to name
//! 2. **User-friendly messages** ([`ErrorContext`]) with a suggestion and details for
//!    CLI display
//!
//! Internal functions return [`anyhow::Result`] and attach context with
//! `.context(...)`. At the top of the program, [`user_friendly_error`] turns whatever
//! bubbled up into an [`ErrorContext`] which `main` prints and converts into an exit
//! code via [`BootstrapError::exit_code`].
//!
//! # Error Tiers
//!
//! - **Best-effort**: download, extraction and clone failures for a single dependency.
//!   These are caught by the fetcher and recorded in a
//!   [`FetchReport`](crate::fetch::FetchReport); they never reach `main`.
//! - **Fatal**: unsupported platform, declined confirmation, build tool failure.
//!   These abort the run immediately.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rayboot::core::{BootstrapError, user_friendly_error};
//!
//! let error = anyhow::Error::from(BootstrapError::UnsupportedPlatform {
//!     os: "plan9".to_string(),
//! });
//! let context = user_friendly_error(error);
//! context.display();
//! assert_eq!(context.error.exit_code(), 1);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for rayboot operations.
///
/// # Error Categories
///
/// ## Fatal
/// - [`UnsupportedPlatform`] - Host OS has no dependency table
/// - [`Aborted`] - The user declined deleting the dependency directory
/// - [`BuildToolNotFound`] / [`BuildToolFailed`] - CMake missing or exited non-zero
/// - [`ConfigError`] - Invalid configuration file
///
/// ## Per-dependency
/// - [`DownloadFailed`] / [`HttpStatus`] - Network problems
/// - [`ExtractionFailed`] / [`UnsafeArchiveEntry`] - Archive problems
/// - [`UnsupportedSource`] - URL is neither an archive nor a git repository
/// - [`GitNotFound`] / [`GitCloneFailed`] - Clone problems
///
/// [`UnsupportedPlatform`]: BootstrapError::UnsupportedPlatform
/// [`Aborted`]: BootstrapError::Aborted
/// [`BuildToolNotFound`]: BootstrapError::BuildToolNotFound
/// [`BuildToolFailed`]: BootstrapError::BuildToolFailed
/// [`ConfigError`]: BootstrapError::ConfigError
/// [`DownloadFailed`]: BootstrapError::DownloadFailed
/// [`HttpStatus`]: BootstrapError::HttpStatus
/// [`ExtractionFailed`]: BootstrapError::ExtractionFailed
/// [`UnsafeArchiveEntry`]: BootstrapError::UnsafeArchiveEntry
/// [`UnsupportedSource`]: BootstrapError::UnsupportedSource
/// [`GitNotFound`]: BootstrapError::GitNotFound
/// [`GitCloneFailed`]: BootstrapError::GitCloneFailed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The host operating system has no dependency table.
    #[error("Unsupported operating system: {os}")]
    UnsupportedPlatform {
        /// The OS identifier that was detected
        os: String,
    },

    /// The user did not confirm deleting an existing directory.
    #[error("Aborted: '{path}' was left untouched")]
    Aborted {
        /// The directory the user was asked about
        path: String,
    },

    /// The HTTP request could not be completed.
    #[error("Failed to download {url}")]
    DownloadFailed {
        /// The URL being downloaded
        url: String,
        /// Transport-level reason
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Download of {url} failed with HTTP {status}")]
    HttpStatus {
        /// The URL being downloaded
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The archive could not be read or unpacked.
    #[error("Failed to extract {archive}: {reason}")]
    ExtractionFailed {
        /// The archive file name
        archive: String,
        /// Reason reported by the decoder
        reason: String,
    },

    /// An archive entry would be written outside the destination directory.
    #[error("Archive {archive} contains an entry outside the extraction directory: {entry}")]
    UnsafeArchiveEntry {
        /// The archive file name
        archive: String,
        /// The offending entry path
        entry: String,
    },

    /// The URL suffix is not `.tar.gz`, `.zip` or `.git`.
    #[error("Unsupported dependency source: {url}")]
    UnsupportedSource {
        /// The dependency URL
        url: String,
    },

    /// Git executable not found in PATH.
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// `git clone` exited non-zero.
    #[error("Failed to clone repository: {url}")]
    GitCloneFailed {
        /// The repository URL
        url: String,
        /// stderr of the git process
        reason: String,
    },

    /// The build tool executable could not be located.
    #[error("Build tool '{tool}' is not installed or not found in PATH")]
    BuildToolNotFound {
        /// Name or path of the build tool
        tool: String,
    },

    /// A configure or build step exited non-zero.
    #[error("Build tool {step} step failed{}", exit_code_suffix(.code))]
    BuildToolFailed {
        /// Either "configure" or "build"
        step: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// The produced binary is missing after a successful build.
    #[error("Built executable not found at {path}")]
    ExecutableNotFound {
        /// Expected executable location
        path: String,
    },

    /// Invalid configuration file.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// General file system failure.
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The operation that failed
        operation: String,
        /// The path involved
        path: String,
    },

    /// Insufficient permissions.
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that failed
        operation: String,
        /// The path involved
        path: String,
    },

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}")).unwrap_or_default()
}

impl BootstrapError {
    /// Process exit code for this error.
    ///
    /// A failed configure/build step propagates the tool's own exit code; every other
    /// fatal error exits with 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BuildToolFailed {
                code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Suggestions are displayed in green, details in yellow.
///
/// ```rust,no_run
/// use rayboot::core::{BootstrapError, ErrorContext};
///
/// let context = ErrorContext::new(BootstrapError::GitNotFound)
///     .with_suggestion("Install git from https://git-scm.com/")
///     .with_details("Cloning auxiliary libraries requires git");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BootstrapError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BootstrapError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`BootstrapError`] anywhere in the chain, [`std::io::Error`] kinds and
/// TOML parse errors. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(bootstrap_error) = error.chain().find_map(|e| e.downcast_ref::<BootstrapError>()) {
        return create_error_context(bootstrap_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BootstrapError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check ownership and permissions of the project directory")
                .with_details("rayboot needs write access to the project, dependency and build directories");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BootstrapError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(BootstrapError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in rayboot.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(BootstrapError::Other {
        message,
    })
}

fn create_error_context(error: BootstrapError) -> ErrorContext {
    match &error {
        BootstrapError::UnsupportedPlatform { os } => ErrorContext::new(error.clone())
            .with_suggestion("Run rayboot on Linux or Windows")
            .with_details(format!("No prebuilt raylib archive is configured for '{os}'")),

        BootstrapError::Aborted { path } => ErrorContext::new(error.clone())
            .with_suggestion("Answer 'yes' at the prompt or pass --yes to replace the directory")
            .with_details(format!("Setup needs to recreate '{path}' from scratch")),

        BootstrapError::GitNotFound => ErrorContext::new(error.clone())
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'apt install git')")
            .with_details("Cloning auxiliary libraries uses the system git binary"),

        BootstrapError::GitCloneFailed { url, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Verify the repository URL is correct: {url}. Check your internet connection"
            )),

        BootstrapError::BuildToolNotFound { tool } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Install {tool} (https://cmake.org/download/) or set RAYBOOT_BUILD_TOOL to its path"
            )),

        BootstrapError::BuildToolFailed { step, .. } => ErrorContext::new(error.clone())
            .with_suggestion(match step.as_str() {
                "configure" => "Check CMakeLists.txt and that a C/C++ compiler is installed",
                _ => "Inspect the compiler output above; the dependency download may be incomplete",
            })
            .with_details("The build tool output was streamed above"),

        BootstrapError::PermissionDenied { operation, path } => ErrorContext::new(error.clone())
            .with_suggestion(match cfg!(windows) {
                true => "Run as Administrator or check file permissions in File Explorer",
                false => "Check file permissions with 'ls -la'",
            })
            .with_details(format!("Cannot {operation} due to insufficient permissions on {path}")),

        BootstrapError::ConfigError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Fix the reported key or value, or delete the file to use the defaults"),

        _ => ErrorContext::new(error),
    }
}
