//! Dialog template data model.
//!
//! A dialog template is the per-language JSON file a module ships under
//! `dialogTemplate/`: module metadata, intents with example utterances and
//! slot bindings, and the slot types those bindings refer to.
//!
//! The serde model is deliberately lenient (defaults everywhere): schema
//! validation reports structural problems separately, and the
//! cross-reference stages still want to run over partially valid files.

use crate::core::error::Result;
use crate::template::utterance;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One enumerated value of a slot type, with optional synonyms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotValue {
    /// Canonical value.
    pub value: String,
    /// Alternative phrasings for the same value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

/// A named slot type with its enumerated values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotType {
    /// Slot type name, referenced by intent slot bindings.
    pub name: String,
    /// NLU matching strictness, when the host supports tuning it.
    #[serde(default)]
    pub matching_strictness: Option<f64>,
    /// Whether the NLU may accept values outside the enumerated set.
    #[serde(default)]
    pub automatically_extensible: bool,
    /// Whether synonyms participate in matching.
    #[serde(default)]
    pub use_synonyms: bool,
    /// Enumerated values.
    #[serde(default)]
    pub values: Vec<SlotValue>,
}

impl SlotType {
    /// Check whether this slot type covers a spoken value.
    ///
    /// An automatically extensible type covers everything. Otherwise the
    /// folded value must equal a folded enumerated value, or a folded
    /// synonym when synonyms are enabled.
    pub fn covers(&self, value: &str) -> bool {
        if self.automatically_extensible {
            return true;
        }
        let folded = utterance::fold(value);
        self.values.iter().any(|slot_value| {
            if utterance::fold(&slot_value.value) == folded {
                return true;
            }
            self.use_synonyms
                && slot_value
                    .synonyms
                    .iter()
                    .any(|synonym| utterance::fold(synonym) == folded)
        })
    }
}

/// Binding of a slot name to a slot type within one intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotBinding {
    /// Slot name as referenced from utterances.
    pub name: String,
    /// Whether the intent requires this slot to be filled.
    #[serde(default)]
    pub required: bool,
    /// Name of the slot type (or a builtin entity identifier).
    #[serde(rename = "type")]
    pub slot_type: String,
    /// Question the assistant asks when a required slot is missing.
    #[serde(
        default,
        rename = "missingQuestion",
        skip_serializing_if = "Option::is_none"
    )]
    pub missing_question: Option<String>,
}

/// An intent with its example utterances and slot bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDefinition {
    /// Intent name the host routes on.
    pub name: String,
    /// Whether the intent starts enabled.
    #[serde(default = "default_true")]
    pub enabled_by_default: bool,
    /// Example utterances, possibly embedding slot references.
    #[serde(default)]
    pub utterances: Vec<String>,
    /// Slot bindings available to the utterances.
    #[serde(default)]
    pub slots: Vec<SlotBinding>,
}

fn default_true() -> bool {
    true
}

impl IntentDefinition {
    /// Resolve an utterance slot reference to a slot type name.
    ///
    /// Falls back to the reference name itself when no binding declares it;
    /// templates commonly name a slot after its type.
    pub fn resolve_slot_type<'a>(&'a self, reference_name: &'a str) -> &'a str {
        self.slots
            .iter()
            .find(|binding| binding.name == reference_name)
            .map(|binding| binding.slot_type.as_str())
            .unwrap_or(reference_name)
    }
}

/// A parsed per-language dialog template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogTemplate {
    /// Module name.
    #[serde(default)]
    pub module: String,
    /// Module icon.
    #[serde(default)]
    pub icon: String,
    /// Module description.
    #[serde(default)]
    pub description: String,
    /// Slot types declared by this language file.
    #[serde(default)]
    pub slot_types: Vec<SlotType>,
    /// Intents declared by this language file.
    #[serde(default)]
    pub intents: Vec<IntentDefinition>,
}

impl DialogTemplate {
    /// Load and parse a dialog template from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Look up a slot type by name.
    pub fn slot_type(&self, name: &str) -> Option<&SlotType> {
        self.slot_types.iter().find(|slot| slot.name == name)
    }

    /// Slot type names declared by this file, in declaration order.
    pub fn slot_type_names(&self) -> impl Iterator<Item = &str> {
        self.slot_types.iter().map(|slot| slot.name.as_str())
    }

    /// Slot types keyed by name, for merging scopes across modules.
    pub fn slot_type_map(&self) -> IndexMap<String, SlotType> {
        self.slot_types
            .iter()
            .map(|slot| (slot.name.clone(), slot.clone()))
            .collect()
    }

    /// Per-intent slot usage: slot type name to the example values spoken
    /// for it across all utterances of the intent.
    pub fn utterance_slots(&self) -> IndexMap<String, IndexMap<String, Vec<String>>> {
        let mut intents = IndexMap::new();
        for intent in &self.intents {
            let slots: &mut IndexMap<String, Vec<String>> =
                intents.entry(intent.name.clone()).or_default();
            for utterance_text in &intent.utterances {
                for reference in utterance::slot_references(utterance_text) {
                    let slot_type = intent.resolve_slot_type(&reference.name).to_string();
                    slots.entry(slot_type).or_default().push(reference.value);
                }
            }
        }
        intents
    }

    /// Per-intent short-form index: canonical form to the utterances that
    /// reduce to it. Groups with more than one utterance are duplicates.
    pub fn short_utterances(&self) -> IndexMap<String, IndexMap<String, Vec<String>>> {
        let mut intents = IndexMap::new();
        for intent in &self.intents {
            let forms: &mut IndexMap<String, Vec<String>> =
                intents.entry(intent.name.clone()).or_default();
            for utterance_text in &intent.utterances {
                forms
                    .entry(utterance::short_form(utterance_text))
                    .or_default()
                    .push(utterance_text.clone());
            }
        }
        intents
    }
}
