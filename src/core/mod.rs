//! Core types for rayboot
//!
//! - [`BootstrapError`] - Enumerated failure modes of the bootstrap pipeline
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format

pub mod error;

pub use error::{BootstrapError, ErrorContext, user_friendly_error};
