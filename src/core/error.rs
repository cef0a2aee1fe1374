//! Error types for dialoglint.
//!
//! Uses thiserror for structured errors with context. There are two layers:
//! - [`DialoglintError`]: operational failures (I/O, bad patterns, schema
//!   compilation) that abort a run.
//! - [`ValidationIssue`]: findings about the validated files themselves.
//!   These never abort a run; they accumulate into reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for dialoglint.
///
/// This enum encompasses all operational error categories and enables
/// automatic conversion from the underlying error types.
#[derive(Error, Debug)]
pub enum DialoglintError {
    /// Reading a file or walking the tree failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or deserializing JSON failed outside of validation.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file glob pattern did not compile.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// An embedded JSON schema did not compile.
    #[error("Failed to compile schema '{name}': {message}")]
    SchemaCompilation { name: String, message: String },

    /// A module name did not resolve to a published module.
    #[error("No such module: '{0}'")]
    ModuleNotFound(String),

    /// The repository root has no modules directory.
    #[error("Not a module repository: {0}")]
    RepositoryNotFound(String),

    /// Catch-all for errors without a dedicated variant.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for dialoglint operations.
pub type Result<T> = std::result::Result<T, DialoglintError>;

/// A single finding produced by a validation stage.
///
/// Every variant names the file it was found in, as a module-relative path
/// like `dialogTemplate/en.json` or `talks/en.json`, so reports can group
/// findings per file and category without same-named files of different
/// kinds colliding.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// The file is not syntactically valid JSON.
    #[error("{file}: invalid JSON: {message}")]
    InvalidJson { file: String, message: String },

    /// The file parsed but does not satisfy its JSON schema.
    #[error("{file}: schema violation: {message}")]
    SchemaViolation { file: String, message: String },

    /// An utterance references a slot type that is not defined anywhere in
    /// the module's resolved slot scope.
    #[error("{file}: intent '{intent}' references undefined slot type '{slot}'")]
    MissingSlot {
        file: String,
        intent: String,
        slot: String,
    },

    /// An utterance carries example values that the referenced slot type
    /// does not cover.
    #[error("{file}: intent '{intent}', slot '{slot}': uncovered values: {values:?}")]
    MissingSlotValues {
        file: String,
        intent: String,
        slot: String,
        values: Vec<String>,
    },

    /// A language file is missing slot types that sibling language files of
    /// the same module declare.
    #[error("{file}: slot types missing from this language: {slots:?}")]
    InconsistentSlots { file: String, slots: Vec<String> },

    /// Two or more utterances of one intent reduce to the same short form.
    #[error("{file}: intent '{intent}': duplicate utterances for '{short_form}': {utterances:?}")]
    DuplicateUtterances {
        file: String,
        intent: String,
        short_form: String,
        utterances: Vec<String>,
    },
}

impl ValidationIssue {
    /// File the issue was found in.
    pub fn file(&self) -> &str {
        match self {
            ValidationIssue::InvalidJson { file, .. }
            | ValidationIssue::SchemaViolation { file, .. }
            | ValidationIssue::MissingSlot { file, .. }
            | ValidationIssue::MissingSlotValues { file, .. }
            | ValidationIssue::InconsistentSlots { file, .. }
            | ValidationIssue::DuplicateUtterances { file, .. } => file,
        }
    }

    /// Whether the issue is advisory rather than failing.
    ///
    /// Duplicate utterances waste training examples but do not break a
    /// module, so they never fail a run.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationIssue::DuplicateUtterances { .. })
    }

    /// Get a suggestion for fixing this issue.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            ValidationIssue::MissingSlot { slot, .. } => Some(format!(
                "Declare slot type '{}' in slotTypes, or depend on a module that does",
                slot
            )),
            ValidationIssue::MissingSlotValues { slot, .. } => Some(format!(
                "Add the values to slot type '{}' or mark it automatically extensible",
                slot
            )),
            ValidationIssue::InconsistentSlots { .. } => {
                Some("Declare the same slot types in every language file".to_string())
            }
            ValidationIssue::DuplicateUtterances { .. } => {
                Some("Keep one utterance per phrasing; duplicates add no training value".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_file_accessor() {
        let issue = ValidationIssue::MissingSlot {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTime".to_string(),
            slot: "Room".to_string(),
        };
        assert_eq!(issue.file(), "dialogTemplate/en.json");
    }

    #[test]
    fn test_duplicates_are_warnings() {
        let dup = ValidationIssue::DuplicateUtterances {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTime".to_string(),
            short_form: "what time is it".to_string(),
            utterances: vec!["What time is it".to_string(), "what time is it".to_string()],
        };
        assert!(dup.is_warning());

        let missing = ValidationIssue::MissingSlot {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTime".to_string(),
            slot: "Room".to_string(),
        };
        assert!(!missing.is_warning());
    }

    #[test]
    fn test_suggestions() {
        let issue = ValidationIssue::MissingSlot {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTelemetry".to_string(),
            slot: "TelemetryType".to_string(),
        };
        assert!(issue.suggested_fix().unwrap().contains("TelemetryType"));
    }
}
