//! Individual validation stages.
//!
//! Each stage checks for a specific category of findings over one loaded
//! module.

use crate::core::builtins::is_builtin;
use crate::core::error::{Result, ValidationIssue};
use crate::template::model::{DialogTemplate, SlotType};
use crate::validation::context::{LoadedFile, ModuleContext};
use crate::validation::schema::SchemaSet;
use indexmap::{IndexMap, IndexSet};

/// Trait for validation stages.
pub trait ValidationStage: Send + Sync {
    /// Name of this validation stage.
    fn name(&self) -> &str;

    /// Validate the module, returning every finding.
    fn validate(&self, context: &ModuleContext<'_>) -> Result<Vec<ValidationIssue>>;
}

/// Schema validation.
///
/// Checks every dialog template, installer manifest, and talk file against
/// its embedded JSON schema. Files that are not valid JSON at all are
/// reported here as syntax findings and carry no schema findings.
pub struct SchemaValidation {
    schemas: SchemaSet,
}

impl SchemaValidation {
    /// Create the stage from the embedded schemas.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            schemas: SchemaSet::embedded()?,
        })
    }

    fn check_files<F>(&self, files: &[LoadedFile], check: F, issues: &mut Vec<ValidationIssue>)
    where
        F: Fn(&SchemaSet, &serde_json::Value) -> Vec<String>,
    {
        for file in files {
            if let Some(message) = &file.syntax_error {
                issues.push(ValidationIssue::InvalidJson {
                    file: file.name.clone(),
                    message: message.clone(),
                });
                continue;
            }
            if let Some(raw) = &file.raw {
                for message in check(&self.schemas, raw) {
                    issues.push(ValidationIssue::SchemaViolation {
                        file: file.name.clone(),
                        message,
                    });
                }
            }
        }
    }
}

impl ValidationStage for SchemaValidation {
    fn name(&self) -> &str {
        "Schema Validation"
    }

    fn validate(&self, context: &ModuleContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        self.check_files(&context.dialog_files, SchemaSet::check_dialog, &mut issues);
        self.check_files(&context.install_files, SchemaSet::check_install, &mut issues);
        self.check_files(&context.talk_files, SchemaSet::check_talk, &mut issues);
        Ok(issues)
    }
}

/// Slot consistency across the module's language files.
///
/// Every slot type declared by one language file is expected in all of them;
/// a translation missing slot types breaks the NLU for that language.
pub struct SlotConsistency;

impl ValidationStage for SlotConsistency {
    fn name(&self) -> &str {
        "Slot Consistency"
    }

    fn validate(&self, context: &ModuleContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut union: IndexSet<String> = IndexSet::new();
        for (_, template) in context.parsed_templates() {
            union.extend(template.slot_type_names().map(str::to_string));
        }

        let mut issues = Vec::new();
        for (file, template) in context.parsed_templates() {
            let own: IndexSet<&str> = template.slot_type_names().collect();
            let missing: Vec<String> = union
                .iter()
                .filter(|name| !own.contains(name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                issues.push(ValidationIssue::InconsistentSlots {
                    file: file.name.clone(),
                    slots: missing,
                });
            }
        }
        Ok(issues)
    }
}

/// Utterance slot cross-referencing.
///
/// Every slot reference in an utterance must resolve to a slot type defined
/// somewhere in the module's slot scope for that language: the file itself,
/// the required-module closure, or the core modules. Builtin entities are
/// resolved by the host NLU and are skipped. For defined types, the example
/// values spoken in utterances must be covered by the type's value set.
pub struct UtteranceSlotValidation;

impl UtteranceSlotValidation {
    /// Merge the slot types visible to one language file of the module.
    ///
    /// Later declarations win on name clashes, the module's own file last.
    fn slot_scope(
        context: &ModuleContext<'_>,
        file: &LoadedFile,
        own: &DialogTemplate,
    ) -> Result<IndexMap<String, SlotType>> {
        let mut scope = IndexMap::new();
        for module in &context.scope_modules {
            if module == context.module {
                continue;
            }
            let path = module.dialog_file(&file.file_name);
            if !path.is_file() {
                continue;
            }
            match DialogTemplate::load(&path) {
                Ok(template) => scope.extend(template.slot_type_map()),
                Err(error) => log::warn!(
                    "{}: unreadable dependency template {}: {}",
                    context.module.name,
                    path.display(),
                    error
                ),
            }
        }
        scope.extend(own.slot_type_map());
        Ok(scope)
    }
}

impl ValidationStage for UtteranceSlotValidation {
    fn name(&self) -> &str {
        "Utterance Slots"
    }

    fn validate(&self, context: &ModuleContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for (file, template) in context.parsed_templates() {
            let scope = Self::slot_scope(context, file, template)?;
            for (intent, slots) in template.utterance_slots() {
                for (slot_type_name, values) in slots {
                    if is_builtin(&slot_type_name) {
                        continue;
                    }
                    let Some(slot_type) = scope.get(&slot_type_name) else {
                        issues.push(ValidationIssue::MissingSlot {
                            file: file.name.clone(),
                            intent: intent.clone(),
                            slot: slot_type_name,
                        });
                        continue;
                    };
                    let mut uncovered: Vec<String> = Vec::new();
                    for value in values {
                        if !slot_type.covers(&value) && !uncovered.contains(&value) {
                            uncovered.push(value);
                        }
                    }
                    if !uncovered.is_empty() {
                        issues.push(ValidationIssue::MissingSlotValues {
                            file: file.name.clone(),
                            intent: intent.clone(),
                            slot: slot_type_name,
                            values: uncovered,
                        });
                    }
                }
            }
        }
        Ok(issues)
    }
}

/// Duplicate utterance detection.
///
/// Utterances of one intent that reduce to the same short form add no
/// training value; reported as warnings.
pub struct DuplicateUtteranceDetection;

impl ValidationStage for DuplicateUtteranceDetection {
    fn name(&self) -> &str {
        "Duplicate Utterances"
    }

    fn validate(&self, context: &ModuleContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for (file, template) in context.parsed_templates() {
            for (intent, groups) in template.short_utterances() {
                for (short_form, utterances) in groups {
                    if utterances.len() > 1 {
                        issues.push(ValidationIssue::DuplicateUtterances {
                            file: file.name.clone(),
                            intent: intent.clone(),
                            short_form,
                            utterances,
                        });
                    }
                }
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ModuleRepository;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn telemetry_template() -> &'static str {
        r#"{
            "module": "Telemetry",
            "icon": "fas fa-thermometer",
            "description": "Reads sensor values",
            "slotTypes": [
                {
                    "name": "TelemetryType",
                    "automaticallyExtensible": false,
                    "useSynonyms": true,
                    "values": [
                        {"value": "temperature", "synonyms": ["heat"]},
                        {"value": "humidity"}
                    ]
                }
            ],
            "intents": [
                {
                    "name": "GetTelemetryData",
                    "enabledByDefault": true,
                    "utterances": [
                        "what is the {temperature:=>TelemetryType} in the {kitchen:=>Room}",
                        "give me the {heat:=>TelemetryType}",
                        "what is the {pressure:=>TelemetryType}"
                    ],
                    "slots": [
                        {"name": "TelemetryType", "required": true, "type": "TelemetryType"},
                        {"name": "Room", "required": false, "type": "Room"}
                    ]
                }
            ]
        }"#
    }

    fn alice_core_template() -> &'static str {
        r#"{
            "module": "AliceCore",
            "icon": "fas fa-user",
            "description": "Core assistant intents",
            "slotTypes": [
                {
                    "name": "Room",
                    "automaticallyExtensible": true,
                    "useSynonyms": true,
                    "values": [{"value": "kitchen"}]
                }
            ],
            "intents": []
        }"#
    }

    fn setup() -> (TempDir, ModuleRepository) {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "PublishedModules/ProjectAlice/AliceCore/dialogTemplate/en.json",
            alice_core_template(),
        );
        write_file(
            dir.path(),
            "PublishedModules/ProjectAlice/Telemetry/dialogTemplate/en.json",
            telemetry_template(),
        );
        let repository = ModuleRepository::new(dir.path());
        (dir, repository)
    }

    #[test]
    fn test_schema_stage_reports_syntax_and_violations() {
        let (dir, repository) = setup();
        write_file(
            dir.path(),
            "PublishedModules/ProjectAlice/Telemetry/dialogTemplate/fr.json",
            "{ not json",
        );
        write_file(
            dir.path(),
            "PublishedModules/ProjectAlice/Telemetry/Telemetry.install",
            r#"{"name": "Telemetry"}"#,
        );

        let module = repository.find_module("Telemetry").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = SchemaValidation::embedded()
            .unwrap()
            .validate(&context)
            .unwrap();

        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::InvalidJson { file, .. } if file == "dialogTemplate/fr.json"
        )));
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::SchemaViolation { file, .. } if file == "Telemetry.install"
        )));
        // The valid en.json template produces no schema findings.
        assert!(!issues.iter().any(|i| i.file() == "dialogTemplate/en.json"));
    }

    #[test]
    fn test_slot_consistency_flags_missing_translations() {
        let (dir, repository) = setup();
        write_file(
            dir.path(),
            "PublishedModules/ProjectAlice/Telemetry/dialogTemplate/de.json",
            r#"{"module": "Telemetry", "icon": "", "description": "", "slotTypes": [], "intents": []}"#,
        );

        let module = repository.find_module("Telemetry").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = SlotConsistency.validate(&context).unwrap();

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ValidationIssue::InconsistentSlots { file, slots }
                if file == "dialogTemplate/de.json" && slots == &vec!["TelemetryType".to_string()]
        ));
    }

    #[test]
    fn test_utterance_slots_cross_module_scope() {
        let (_dir, repository) = setup();
        // Room is defined by the core module AliceCore and automatically
        // extensible; TelemetryType is local. Only "pressure" is uncovered.
        let module = repository.find_module("Telemetry").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = UtteranceSlotValidation.validate(&context).unwrap();

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ValidationIssue::MissingSlotValues { slot, values, .. }
                if slot == "TelemetryType" && values == &vec!["pressure".to_string()]
        ));
    }

    #[test]
    fn test_utterance_slots_missing_definition() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "PublishedModules/tester/Lonely/dialogTemplate/en.json",
            r#"{
                "module": "Lonely",
                "icon": "",
                "description": "",
                "slotTypes": [],
                "intents": [
                    {
                        "name": "DoThing",
                        "enabledByDefault": true,
                        "utterances": ["do the {thing:=>Gadget}"],
                        "slots": [{"name": "Gadget", "required": true, "type": "Gadget"}]
                    }
                ]
            }"#,
        );

        let repository = ModuleRepository::new(dir.path());
        let module = repository.find_module("Lonely").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = UtteranceSlotValidation.validate(&context).unwrap();

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ValidationIssue::MissingSlot { intent, slot, .. }
                if intent == "DoThing" && slot == "Gadget"
        ));
    }

    #[test]
    fn test_builtin_slots_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "PublishedModules/tester/Timer/dialogTemplate/en.json",
            r#"{
                "module": "Timer",
                "icon": "",
                "description": "",
                "slotTypes": [],
                "intents": [
                    {
                        "name": "SetTimer",
                        "enabledByDefault": true,
                        "utterances": ["set a timer for {five minutes:=>Duration}"],
                        "slots": [{"name": "Duration", "required": true, "type": "snips/duration"}]
                    }
                ]
            }"#,
        );

        let repository = ModuleRepository::new(dir.path());
        let module = repository.find_module("Timer").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = UtteranceSlotValidation.validate(&context).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_duplicate_detection() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "PublishedModules/tester/Minigames/dialogTemplate/en.json",
            r#"{
                "module": "Minigames",
                "icon": "",
                "description": "",
                "slotTypes": [
                    {
                        "name": "Game",
                        "automaticallyExtensible": true,
                        "useSynonyms": false,
                        "values": []
                    }
                ],
                "intents": [
                    {
                        "name": "PlayGame",
                        "enabledByDefault": true,
                        "utterances": [
                            "play {flip a coin:=>Game}",
                            "play {rock paper scissors:=>Game}",
                            "can we play a game"
                        ],
                        "slots": [{"name": "Game", "required": false, "type": "Game"}]
                    }
                ]
            }"#,
        );

        let repository = ModuleRepository::new(dir.path());
        let module = repository.find_module("Minigames").unwrap().unwrap();
        let context = ModuleContext::load(&repository, &module).unwrap();
        let issues = DuplicateUtteranceDetection.validate(&context).unwrap();

        assert_eq!(issues.len(), 1);
        match &issues[0] {
            ValidationIssue::DuplicateUtterances {
                intent, utterances, ..
            } => {
                assert_eq!(intent, "PlayGame");
                assert_eq!(utterances.len(), 2);
            }
            other => panic!("unexpected issue: {:?}", other),
        }
        assert!(issues[0].is_warning());
    }
}
