//! Validation pipeline for module repositories.
//!
//! The pipeline loads each module once and runs every stage over it,
//! accumulating findings into per-module reports grouped by file and
//! category.

pub mod context;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod stages;

pub use context::{LoadedFile, ModuleContext};
pub use pipeline::ValidationPipeline;
pub use report::{FileReport, ModuleReport, RepositoryReport};
pub use schema::SchemaSet;
pub use stages::{
    DuplicateUtteranceDetection, SchemaValidation, SlotConsistency, UtteranceSlotValidation,
    ValidationStage,
};
