//! Core types for dialoglint.
//!
//! This module contains the foundational types shared by the rest of the
//! crate:
//! - Operational error types and the crate-wide `Result` alias
//! - Validation findings ([`ValidationIssue`])
//! - Builtin entity identifiers

pub mod builtins;
pub mod error;

// Re-export commonly used types
pub use builtins::{is_builtin, BUILTIN_ENTITIES};
pub use error::{DialoglintError, Result, ValidationIssue};
