//! Dialog template and installer manifest data model.
//!
//! Everything a module publishes on disk: per-language dialog templates,
//! installer manifests, and the utterance syntax embedded in templates.

pub mod installer;
pub mod model;
pub mod utterance;

// Re-export commonly used types
pub use installer::{InstallConditions, InstallManifest, ModuleDependency};
pub use model::{DialogTemplate, IntentDefinition, SlotBinding, SlotType, SlotValue};
pub use utterance::{fold, short_form, slot_references, SlotReference};
