//! rayboot - raylib project bootstrapper
//!
//! Turns an empty directory into a building, running raylib project:
//!
//! 1. resolve the host [`platform`] to its dependency table
//! 2. ask before deleting an existing dependency directory ([`prompt`])
//! 3. download and unpack raylib, or clone git dependencies ([`fetch`], [`git`])
//! 4. strip documentation, samples and CI files from the tree ([`sanitize`])
//! 5. write `CMakeLists.txt`, `main.cpp` and `.vscode/c_cpp_properties.json` ([`scaffold`])
//! 6. configure, build and run with CMake ([`build`])
//!
//! [`workflow::Bootstrapper`] sequences these stages; [`cli`] exposes them as
//! subcommands.
//!
//! # Project Layout
//!
//! ```text
//! my-game/
//! ├── rayboot.toml              optional configuration
//! ├── CMakeLists.txt            generated
//! ├── main.cpp                  generated
//! ├── .vscode/
//! │   └── c_cpp_properties.json generated
//! ├── dependencies/
//! │   └── raylib/
//! │       ├── include/
//! │       └── lib/
//! └── build/
//! ```
//!
//! # Modules
//!
//! - [`build`] - Build tool driver and subprocess abstraction
//! - [`cli`] - Command-line interface
//! - [`config`] - Optional `rayboot.toml` configuration
//! - [`constants`] - Shared names, denylists and timeouts
//! - [`core`] - Error types and user-facing error formatting
//! - [`fetch`] - Archive downloads, extraction and the fetch report
//! - [`git`] - System git wrapper for cloning
//! - [`models`] - Dependencies and project paths
//! - [`platform`] - Supported platforms and their dependency tables
//! - [`prompt`] - Confirmation providers
//! - [`sanitize`] - Dependency tree denylist cleanup
//! - [`scaffold`] - Generated project files
//! - [`utils`] - File system, command lookup and progress helpers
//! - [`workflow`] - The bootstrap pipeline

pub mod build;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetch;
pub mod git;
pub mod models;
pub mod platform;
pub mod prompt;
pub mod sanitize;
pub mod scaffold;
pub mod utils;
pub mod workflow;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
