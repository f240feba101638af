//! Integration test suite for rayboot
//!
//! End-to-end tests against the public library API and the compiled binary.
//! Network access is limited to a local HTTP server serving generated archives;
//! subprocesses are replaced by a recording runner where a real toolchain would
//! be needed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Binary behavior, exit codes and flags
//! - **fetch**: Archive download, extraction, rename and failure reporting
//! - **sanitize**: Denylist cleanup of fetched trees
//! - **scaffold**: Generated project files
//! - **workflow**: Full setup pipeline

mod cli;
mod fetch;
mod scaffold;
mod workflow;
