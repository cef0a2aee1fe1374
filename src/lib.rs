//! # Dialoglint - Dialog Template Validation
//!
//! Dialoglint validates the JSON files a voice-assistant module repository
//! publishes: per-language dialog templates, installer manifests, and talk
//! files. It cross-checks them against embedded JSON schemas and against
//! each other for slot consistency and duplicate utterances.
//!
//! ## Checks
//!
//! - **Schema**: every file validates against its Draft 7 schema
//! - **Slot consistency**: all language files of a module declare the same
//!   slot types
//! - **Utterance slots**: slot references in utterances resolve to a defined
//!   slot type (own file, required modules, or core modules), and the spoken
//!   example values are covered by that type
//! - **Duplicate utterances**: utterances that differ only in example values
//!   or spelling noise are flagged as warnings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dialoglint::prelude::*;
//!
//! let repository = ModuleRepository::new("/path/to/repo");
//! let pipeline = ValidationPipeline::default_pipeline()?;
//! let report = pipeline.validate_repository(&repository, None)?;
//!
//! println!("{}", report.summary());
//! for module in report.modules.values() {
//!     for line in module.detailed_issues(true) {
//!         println!("{}", line);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error types, validation findings, builtin entity identifiers
//! - [`template`]: dialog template and installer manifest data model,
//!   utterance parsing
//! - [`repository`]: module discovery and dependency resolution
//! - [`validation`]: staged validation pipeline and reports

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod repository;
pub mod template;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use dialoglint::prelude::*;
/// ```
pub mod prelude {
    // Errors and findings
    pub use crate::core::error::{DialoglintError, Result, ValidationIssue};

    // Builtin entities
    pub use crate::core::builtins::{is_builtin, BUILTIN_ENTITIES};

    // Data model
    pub use crate::template::installer::{InstallConditions, InstallManifest, ModuleDependency};
    pub use crate::template::model::{
        DialogTemplate, IntentDefinition, SlotBinding, SlotType, SlotValue,
    };
    pub use crate::template::utterance::{fold, short_form, slot_references, SlotReference};

    // Repository
    pub use crate::repository::{Module, ModuleRepository};

    // Validation
    pub use crate::validation::context::{LoadedFile, ModuleContext};
    pub use crate::validation::pipeline::ValidationPipeline;
    pub use crate::validation::report::{FileReport, ModuleReport, RepositoryReport};
    pub use crate::validation::schema::SchemaSet;
    pub use crate::validation::stages::{
        DuplicateUtteranceDetection, SchemaValidation, SlotConsistency, UtteranceSlotValidation,
        ValidationStage,
    };
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "dialoglint");
    }

    #[test]
    fn test_default_pipeline_builds() {
        assert!(ValidationPipeline::default_pipeline().is_ok());
    }

    #[test]
    fn test_prelude_exports() {
        assert!(is_builtin("snips/number"));
        assert_eq!(short_form("Hello  There"), "hello there");
    }
}
