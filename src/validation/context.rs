//! Loaded module context handed to validation stages.
//!
//! The pipeline reads every file of a module exactly once; stages then work
//! on the shared parse results instead of re-reading the tree.

use crate::core::error::Result;
use crate::repository::{Module, ModuleRepository};
use crate::template::model::DialogTemplate;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One file of the module, read and (when possible) parsed.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Path relative to the module directory, e.g. `dialogTemplate/en.json`
    /// or `talks/en.json`. Reports key files by this, so same-named files of
    /// different kinds stay apart.
    pub name: String,
    /// Bare file name, e.g. `en.json`. For dialog files this is the
    /// language file name probed on other modules.
    pub file_name: String,
    /// Parsed JSON document, absent when the file did not parse.
    pub raw: Option<Value>,
    /// Typed dialog template, for dialog files whose structure was close
    /// enough to parse. Schema validation reports the gaps.
    pub template: Option<DialogTemplate>,
    /// JSON syntax error message, when the file did not parse.
    pub syntax_error: Option<String>,
}

impl LoadedFile {
    fn read(path: &Path, kind_dir: Option<&str>, typed: bool) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match kind_dir {
            Some(dir) => format!("{}/{}", dir, file_name),
            None => file_name.clone(),
        };
        let text = fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(raw) => {
                let template = if typed {
                    serde_json::from_value(raw.clone()).ok()
                } else {
                    None
                };
                Ok(Self {
                    name,
                    file_name,
                    raw: Some(raw),
                    template,
                    syntax_error: None,
                })
            }
            Err(error) => Ok(Self {
                name,
                file_name,
                raw: None,
                template: None,
                syntax_error: Some(error.to_string()),
            }),
        }
    }
}

/// Everything a stage needs to validate one module.
pub struct ModuleContext<'a> {
    /// The module under validation.
    pub module: &'a Module,
    /// The repository the module lives in.
    pub repository: &'a ModuleRepository,
    /// Modules contributing slot types to this module's scope: the
    /// required-module closure plus the core modules. Resolved once per
    /// module; the closure does not depend on the language file.
    pub scope_modules: Vec<Module>,
    /// Dialog template files, in file-name order.
    pub dialog_files: Vec<LoadedFile>,
    /// Installer manifest files.
    pub install_files: Vec<LoadedFile>,
    /// Talk files.
    pub talk_files: Vec<LoadedFile>,
}

impl<'a> ModuleContext<'a> {
    /// Load every validated file of a module and resolve its slot scope.
    pub fn load(repository: &'a ModuleRepository, module: &'a Module) -> Result<Self> {
        let mut scope_modules = repository.required_modules(module)?;
        for core in repository.core_modules()? {
            if !scope_modules.contains(&core) {
                scope_modules.push(core);
            }
        }

        let mut dialog_files = Vec::new();
        for path in module.dialog_files()? {
            dialog_files.push(LoadedFile::read(&path, Some("dialogTemplate"), true)?);
        }
        let mut install_files = Vec::new();
        for path in module.install_files()? {
            install_files.push(LoadedFile::read(&path, None, false)?);
        }
        let mut talk_files = Vec::new();
        for path in module.talk_files()? {
            talk_files.push(LoadedFile::read(&path, Some("talks"), false)?);
        }
        Ok(Self {
            module,
            repository,
            scope_modules,
            dialog_files,
            install_files,
            talk_files,
        })
    }

    /// Dialog files that parsed into a typed template.
    pub fn parsed_templates(&self) -> impl Iterator<Item = (&LoadedFile, &DialogTemplate)> {
        self.dialog_files
            .iter()
            .filter_map(|file| file.template.as_ref().map(|template| (file, template)))
    }
}
