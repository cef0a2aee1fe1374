//! Validation reports.
//!
//! Findings accumulate into a nested structure mirroring the repository:
//! repository -> module -> file -> category. The categories follow the
//! stages: `syntax`, `schema`, `missingSlots`, `missingSlotValues`,
//! `inconsistentSlots`, and `duplicates`.

use crate::core::error::ValidationIssue;
use indexmap::IndexMap;
use serde::Serialize;

/// Findings for one file, grouped by category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    /// JSON syntax error, when the file did not parse at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    /// Schema violation messages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<String>,
    /// Undefined slot types per intent.
    #[serde(rename = "missingSlots", skip_serializing_if = "IndexMap::is_empty")]
    pub missing_slots: IndexMap<String, Vec<String>>,
    /// Uncovered slot values per intent and slot type.
    #[serde(rename = "missingSlotValues", skip_serializing_if = "IndexMap::is_empty")]
    pub missing_slot_values: IndexMap<String, IndexMap<String, Vec<String>>>,
    /// Slot types declared by sibling language files but not this one.
    #[serde(rename = "inconsistentSlots", skip_serializing_if = "Vec::is_empty")]
    pub inconsistent_slots: Vec<String>,
    /// Duplicate utterances per intent and short form.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub duplicates: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl FileReport {
    /// Whether this file has any failing finding. Duplicates do not count.
    pub fn has_errors(&self) -> bool {
        self.syntax.is_some()
            || !self.schema.is_empty()
            || !self.missing_slots.is_empty()
            || !self.missing_slot_values.is_empty()
            || !self.inconsistent_slots.is_empty()
    }

    /// Whether this file has any finding at all.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && self.duplicates.is_empty()
    }
}

/// Validation report for one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    /// Module name.
    pub module: String,
    /// Module author.
    pub author: String,
    /// Per-file findings, in discovery order.
    pub files: IndexMap<String, FileReport>,
    /// Time taken for validation in milliseconds.
    pub duration_ms: u64,
    #[serde(skip)]
    errors: Vec<ValidationIssue>,
    #[serde(skip)]
    warnings: Vec<ValidationIssue>,
}

impl ModuleReport {
    /// Create an empty report for a module.
    pub fn new(module: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            author: author.into(),
            files: IndexMap::new(),
            duration_ms: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a finding, routing it into the per-file category structure.
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        let file = self.files.entry(issue.file().to_string()).or_default();
        match &issue {
            ValidationIssue::InvalidJson { message, .. } => {
                file.syntax = Some(message.clone());
            }
            ValidationIssue::SchemaViolation { message, .. } => {
                file.schema.push(message.clone());
            }
            ValidationIssue::MissingSlot { intent, slot, .. } => {
                file.missing_slots
                    .entry(intent.clone())
                    .or_default()
                    .push(slot.clone());
            }
            ValidationIssue::MissingSlotValues {
                intent,
                slot,
                values,
                ..
            } => {
                file.missing_slot_values
                    .entry(intent.clone())
                    .or_default()
                    .entry(slot.clone())
                    .or_default()
                    .extend(values.iter().cloned());
            }
            ValidationIssue::InconsistentSlots { slots, .. } => {
                file.inconsistent_slots.extend(slots.iter().cloned());
            }
            ValidationIssue::DuplicateUtterances {
                intent,
                short_form,
                utterances,
                ..
            } => {
                file.duplicates
                    .entry(intent.clone())
                    .or_default()
                    .insert(short_form.clone(), utterances.clone());
            }
        }
        if issue.is_warning() {
            self.warnings.push(issue);
        } else {
            self.errors.push(issue);
        }
    }

    /// Failing findings.
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Advisory findings.
    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// Whether the module fails validation.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a human-readable summary line.
    pub fn summary(&self) -> String {
        if self.has_errors() {
            format!(
                "✗ {}/{}: {} error(s), {} warning(s)",
                self.author,
                self.module,
                self.errors.len(),
                self.warnings.len()
            )
        } else if self.warnings.is_empty() {
            format!("✓ {}/{}", self.author, self.module)
        } else {
            format!(
                "✓ {}/{}: {} warning(s)",
                self.author,
                self.module,
                self.warnings.len()
            )
        }
    }

    /// Get detailed finding messages with suggestions.
    pub fn detailed_issues(&self, include_warnings: bool) -> Vec<String> {
        let warnings = self.warnings.iter().filter(|_| include_warnings);
        self.errors
            .iter()
            .chain(warnings)
            .map(|issue| {
                let mut message = issue.to_string();
                if let Some(fix) = issue.suggested_fix() {
                    message.push_str(&format!("\n   → {}", fix));
                }
                message
            })
            .collect()
    }
}

/// Aggregated report over a whole repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryReport {
    /// Module reports keyed by module name, in discovery order.
    pub modules: IndexMap<String, ModuleReport>,
    /// Time taken for the whole run in milliseconds.
    pub duration_ms: u64,
}

impl RepositoryReport {
    /// Create an empty repository report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module report.
    pub fn add_module(&mut self, report: ModuleReport) {
        self.modules.insert(report.module.clone(), report);
    }

    /// Whether any module fails validation.
    pub fn has_errors(&self) -> bool {
        self.modules.values().any(ModuleReport::has_errors)
    }

    /// Total failing findings across modules.
    pub fn error_count(&self) -> usize {
        self.modules.values().map(|m| m.errors().len()).sum()
    }

    /// Total advisory findings across modules.
    pub fn warning_count(&self) -> usize {
        self.modules.values().map(|m| m.warnings().len()).sum()
    }

    /// Get a human-readable summary line.
    pub fn summary(&self) -> String {
        if self.has_errors() {
            format!(
                "✗ {} module(s) checked, {} error(s), {} warning(s)",
                self.modules.len(),
                self.error_count(),
                self.warning_count()
            )
        } else {
            format!(
                "✓ {} module(s) checked, {} warning(s)",
                self.modules.len(),
                self.warning_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_slot() -> ValidationIssue {
        ValidationIssue::MissingSlot {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTelemetry".to_string(),
            slot: "TelemetryType".to_string(),
        }
    }

    fn duplicate() -> ValidationIssue {
        ValidationIssue::DuplicateUtterances {
            file: "dialogTemplate/en.json".to_string(),
            intent: "GetTime".to_string(),
            short_form: "what time is it".to_string(),
            utterances: vec!["what time is it".to_string(), "What time is it".to_string()],
        }
    }

    #[test]
    fn test_routing_into_categories() {
        let mut report = ModuleReport::new("Telemetry", "ProjectAlice");
        report.add_issue(missing_slot());
        report.add_issue(duplicate());

        let file = &report.files["dialogTemplate/en.json"];
        assert_eq!(file.missing_slots["GetTelemetry"], vec!["TelemetryType"]);
        assert_eq!(file.duplicates["GetTime"].len(), 1);
        assert!(report.has_errors());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_warnings_do_not_fail_module() {
        let mut report = ModuleReport::new("DateDayTimeYear", "Psychokiller1888");
        report.add_issue(duplicate());
        assert!(!report.has_errors());
        assert!(report.summary().starts_with('✓'));
        assert!(report.summary().contains("1 warning(s)"));
    }

    #[test]
    fn test_repository_aggregation() {
        let mut repo_report = RepositoryReport::new();

        let mut failing = ModuleReport::new("Telemetry", "ProjectAlice");
        failing.add_issue(missing_slot());
        repo_report.add_module(failing);
        repo_report.add_module(ModuleReport::new("Speller", "Psychokiller1888"));

        assert!(repo_report.has_errors());
        assert_eq!(repo_report.error_count(), 1);
        assert_eq!(repo_report.modules.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let mut report = ModuleReport::new("Telemetry", "ProjectAlice");
        report.add_issue(missing_slot());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["files"]["dialogTemplate/en.json"]["missingSlots"]["GetTelemetry"][0],
            "TelemetryType"
        );
        // Raw issue lists stay out of the serialized form.
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_detailed_issues_include_suggestions() {
        let mut report = ModuleReport::new("Telemetry", "ProjectAlice");
        report.add_issue(missing_slot());
        report.add_issue(duplicate());

        let without_warnings = report.detailed_issues(false);
        assert_eq!(without_warnings.len(), 1);
        assert!(without_warnings[0].contains("TelemetryType"));

        let with_warnings = report.detailed_issues(true);
        assert_eq!(with_warnings.len(), 2);
    }
}
