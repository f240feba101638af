//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - File system operations with path-aware errors
//! - [`output`] - Quiet-aware status lines
//! - [`platform`] - Platform-specific helpers and command lookup
//! - [`progress`] - Progress bars and spinners for downloads and extraction

pub mod fs;
pub mod output;
pub mod platform;
pub mod progress;

pub use fs::{ensure_dir, remove_dir_all, write_text_file};
pub use platform::{command_exists, is_windows, normalize_path_for_storage};
pub use progress::ProgressBar;
