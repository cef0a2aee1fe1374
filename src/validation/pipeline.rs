//! Validation pipeline implementation.

use crate::core::error::Result;
use crate::repository::{Module, ModuleRepository};
use crate::validation::context::ModuleContext;
use crate::validation::report::{ModuleReport, RepositoryReport};
use crate::validation::stages::{
    DuplicateUtteranceDetection, SchemaValidation, SlotConsistency, UtteranceSlotValidation,
    ValidationStage,
};
use std::time::Instant;

/// Multi-stage validation pipeline.
///
/// Runs a series of validation stages over a module and accumulates their
/// findings into a report. Stages are independent; all of them run even when
/// earlier ones found problems, so one run reports everything at once.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn ValidationStage>>,
}

impl ValidationPipeline {
    /// Create a new pipeline with the given stages.
    pub fn new(stages: Vec<Box<dyn ValidationStage>>) -> Self {
        Self { stages }
    }

    /// Create the default pipeline with all standard stages.
    pub fn default_pipeline() -> Result<Self> {
        Ok(Self {
            stages: vec![
                Box::new(SchemaValidation::embedded()?),
                Box::new(SlotConsistency),
                Box::new(UtteranceSlotValidation),
                Box::new(DuplicateUtteranceDetection),
            ],
        })
    }

    /// Create a minimal pipeline (schema checks only).
    pub fn schema_only() -> Result<Self> {
        Ok(Self {
            stages: vec![Box::new(SchemaValidation::embedded()?)],
        })
    }

    /// Add a custom validation stage.
    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    /// Validate one module through all stages.
    pub fn validate_module(
        &self,
        repository: &ModuleRepository,
        module: &Module,
    ) -> Result<ModuleReport> {
        let start = Instant::now();
        let context = ModuleContext::load(repository, module)?;
        let mut report = ModuleReport::new(&module.name, &module.author);

        for stage in &self.stages {
            log::debug!("{}: running stage '{}'", module.name, stage.name());
            for issue in stage.validate(&context)? {
                report.add_issue(issue);
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Validate every module of a repository, optionally restricted to a set
    /// of module names.
    pub fn validate_repository(
        &self,
        repository: &ModuleRepository,
        only: Option<&[String]>,
    ) -> Result<RepositoryReport> {
        let start = Instant::now();
        let mut repo_report = RepositoryReport::new();

        for module in repository.discover()? {
            if let Some(names) = only {
                if !names.iter().any(|name| name == &module.name) {
                    continue;
                }
            }
            log::info!("validating {}/{}", module.author, module.name);
            repo_report.add_module(self.validate_module(repository, &module)?);
        }

        repo_report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(repo_report)
    }
}
