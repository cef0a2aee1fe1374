//! Module repository discovery.
//!
//! A repository is a directory tree of the form
//! `<root>/PublishedModules/<author>/<module>/`, where each module directory
//! carries an installer manifest, per-language dialog templates under
//! `dialogTemplate/`, and optionally talk files under `talks/`.

use crate::core::error::{DialoglintError, Result};
use crate::template::installer::InstallManifest;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default directory holding published modules.
pub const DEFAULT_MODULES_DIR: &str = "PublishedModules";

/// Default author of the core modules every module may depend on.
pub const DEFAULT_CORE_AUTHOR: &str = "ProjectAlice";

/// Handle to one module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Author directory the module lives under.
    pub author: String,
    /// Module name (directory name).
    pub name: String,
    /// Absolute path of the module directory.
    pub path: PathBuf,
}

impl Module {
    fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let author = path.parent()?.file_name()?.to_str()?.to_string();
        Some(Self {
            author,
            name,
            path: path.to_path_buf(),
        })
    }

    /// Dialog template files of this module, sorted by file name.
    pub fn dialog_files(&self) -> Result<Vec<PathBuf>> {
        self.glob_sorted(&self.path.join("dialogTemplate").join("*.json"))
    }

    /// Path of the dialog template for one language, e.g. `en.json`.
    ///
    /// The file may not exist; dependency slot scoping probes languages a
    /// required module does not necessarily support.
    pub fn dialog_file(&self, file_name: &str) -> PathBuf {
        self.path.join("dialogTemplate").join(file_name)
    }

    /// Installer manifest files of this module.
    pub fn install_files(&self) -> Result<Vec<PathBuf>> {
        self.glob_sorted(&self.path.join("*.install"))
    }

    /// Talk files of this module, sorted by file name.
    pub fn talk_files(&self) -> Result<Vec<PathBuf>> {
        self.glob_sorted(&self.path.join("talks").join("*.json"))
    }

    fn glob_sorted(&self, pattern: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(error) => {
                    log::warn!("{}: unreadable path skipped: {}", self.name, error);
                    None
                }
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

/// A module repository rooted at a directory on disk.
///
/// The repository knows where modules live and how to resolve dependency
/// declarations between them. It performs no caching; every query walks the
/// tree, which keeps results consistent with concurrent edits and is cheap
/// at the scale of a module collection.
pub struct ModuleRepository {
    root: PathBuf,
    modules_dir: String,
    core_author: String,
}

impl ModuleRepository {
    /// Create a repository handle for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules_dir: DEFAULT_MODULES_DIR.to_string(),
            core_author: DEFAULT_CORE_AUTHOR.to_string(),
        }
    }

    /// Override the directory name holding published modules.
    pub fn with_modules_dir(mut self, modules_dir: impl Into<String>) -> Self {
        self.modules_dir = modules_dir.into();
        self
    }

    /// Override the author whose modules count as core.
    pub fn with_core_author(mut self, core_author: impl Into<String>) -> Self {
        self.core_author = core_author.into();
        self
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn modules_root(&self) -> PathBuf {
        self.root.join(&self.modules_dir)
    }

    /// Discover all modules, in deterministic (author, name) walk order.
    pub fn discover(&self) -> Result<Vec<Module>> {
        let modules_root = self.modules_root();
        if !modules_root.is_dir() {
            return Err(DialoglintError::RepositoryNotFound(
                modules_root.display().to_string(),
            ));
        }

        let modules = WalkDir::new(&modules_root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => Module::from_path(entry.path()),
                Ok(_) => None,
                Err(error) => {
                    log::warn!("unreadable directory skipped: {}", error);
                    None
                }
            })
            .collect();
        Ok(modules)
    }

    /// Find a module by name anywhere in the tree.
    pub fn find_module(&self, name: &str) -> Result<Option<Module>> {
        Ok(self
            .discover()?
            .into_iter()
            .find(|module| module.name == name))
    }

    /// Modules published under the core author.
    pub fn core_modules(&self) -> Result<Vec<Module>> {
        Ok(self
            .discover()?
            .into_iter()
            .filter(|module| module.author == self.core_author)
            .collect())
    }

    /// Transitive closure of the modules a module requires, the module
    /// itself included.
    ///
    /// Dependencies come from `conditions.module` of every installer
    /// manifest. Names that do not resolve to a published module are logged
    /// and skipped; a visited set makes cyclic declarations terminate.
    pub fn required_modules(&self, module: &Module) -> Result<Vec<Module>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut closure = Vec::new();
        let mut pending = vec![module.clone()];

        while let Some(current) = pending.pop() {
            if !visited.insert(current.name.clone()) {
                continue;
            }
            for install_path in current.install_files()? {
                let manifest = match InstallManifest::load(&install_path) {
                    Ok(manifest) => manifest,
                    Err(error) => {
                        log::warn!(
                            "{}: skipping unreadable manifest {}: {}",
                            current.name,
                            install_path.display(),
                            error
                        );
                        continue;
                    }
                };
                for required_name in manifest.required_module_names() {
                    if visited.contains(required_name) {
                        continue;
                    }
                    match self.find_module(required_name)? {
                        Some(required) => pending.push(required),
                        None => log::warn!(
                            "{}: required module '{}' is not published",
                            current.name,
                            required_name
                        ),
                    }
                }
            }
            closure.push(current);
        }

        Ok(closure)
    }
}
