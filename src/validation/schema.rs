//! Compiled JSON schemas for the validated file kinds.
//!
//! The three schemas ship inside the binary (`schemas/*.json`) and are
//! compiled once per pipeline. Validation collects every violation message,
//! sorted, rather than stopping at the first.

use crate::core::error::{DialoglintError, Result};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const DIALOG_SCHEMA: &str = include_str!("../../schemas/dialog-schema.json");
const INSTALL_SCHEMA: &str = include_str!("../../schemas/install-schema.json");
const TALK_SCHEMA: &str = include_str!("../../schemas/talk-schema.json");

/// The compiled schemas for dialog templates, installer manifests, and talk
/// files.
pub struct SchemaSet {
    dialog: JSONSchema,
    install: JSONSchema,
    talk: JSONSchema,
}

impl SchemaSet {
    /// Compile the embedded schemas.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            dialog: compile("dialog", DIALOG_SCHEMA)?,
            install: compile("install", INSTALL_SCHEMA)?,
            talk: compile("talk", TALK_SCHEMA)?,
        })
    }

    /// Validate a dialog template document.
    pub fn check_dialog(&self, instance: &Value) -> Vec<String> {
        collect_errors(&self.dialog, instance)
    }

    /// Validate an installer manifest document.
    pub fn check_install(&self, instance: &Value) -> Vec<String> {
        collect_errors(&self.install, instance)
    }

    /// Validate a talk file document.
    pub fn check_talk(&self, instance: &Value) -> Vec<String> {
        collect_errors(&self.talk, instance)
    }
}

fn compile(name: &str, schema_text: &str) -> Result<JSONSchema> {
    let schema: Value = serde_json::from_str(schema_text)?;
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|error| DialoglintError::SchemaCompilation {
            name: name.to_string(),
            message: error.to_string(),
        })
}

fn collect_errors(schema: &JSONSchema, instance: &Value) -> Vec<String> {
    let mut messages: Vec<String> = match schema.validate(instance) {
        Ok(()) => return Vec::new(),
        Err(errors) => errors
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect(),
    };
    messages.sort();
    messages
}
