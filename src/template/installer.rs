//! Installer manifest (`*.install`) data model.
//!
//! The manifest declares where a module comes from and the conditions under
//! which the host may install it. The validator only cares about the
//! dependency declarations in `conditions.module`, but the whole document is
//! modeled so it can be schema-checked and reserialized.

use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A module dependency declared in `conditions.module`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDependency {
    /// Name of the required module.
    pub name: String,
    /// Where to fetch it from, when not already published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Installation conditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConditions {
    /// Languages the module supports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lang: Vec<String>,
    /// Whether the module needs network access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    /// Modules that must be installed first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module: Vec<ModuleDependency>,
    /// Unmodeled conditions pass through untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

/// A parsed installer manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallManifest {
    /// Module name.
    #[serde(default)]
    pub name: String,
    /// Manifest version.
    #[serde(default)]
    pub version: f64,
    /// Module author.
    #[serde(default)]
    pub author: String,
    /// Installation conditions.
    #[serde(default)]
    pub conditions: InstallConditions,
    /// Unmodeled keys pass through untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

impl InstallManifest {
    /// Load and parse a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Names of the modules this manifest requires.
    pub fn required_module_names(&self) -> impl Iterator<Item = &str> {
        self.conditions
            .module
            .iter()
            .map(|dependency| dependency.name.as_str())
    }
}
