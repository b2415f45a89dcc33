//! Loading a directory of templates into an immutable, name-keyed registry.
//!
//! A bad file never stops the others from loading: it is logged, recorded
//! as a [`LoadFailure`], and skipped. Reloading means building a new
//! [`Registry`]; an existing one is never mutated.

use crate::error::{CordError, Result};
use crate::paths;
use crate::template::CompiledTemplate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: CordError,
}

#[derive(Debug, Default)]
pub struct Registry {
    templates: BTreeMap<String, CompiledTemplate>,
    failures: Vec<LoadFailure>,
}

impl Registry {
    /// Load every template file in `dir`, in file-name order.
    ///
    /// Only a missing or unreadable directory is an error. Individual files
    /// that fail to load end up in [`Registry::failures`].
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CordError::CommandsDirNotFound(dir.to_path_buf()));
        }

        let mut registry = Registry::default();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(error) => {
                    registry.record_failure(dir.to_path_buf(), CordError::Io(error));
                    continue;
                }
            };
            if !paths::is_template_file(&path) {
                continue;
            }
            // Follows symlinks, so a link to a template loads like the file.
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    let error = CordError::SourceLoad {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                    registry.record_failure(path, error);
                }
            }
        }
        files.sort();

        for path in files {
            match CompiledTemplate::load(&path) {
                Ok(template) => registry.insert(template, path),
                Err(error) => registry.record_failure(path, error),
            }
        }

        tracing::info!(
            dir = %dir.display(),
            loaded = registry.len(),
            failed = registry.failures.len(),
            "templates loaded"
        );
        Ok(registry)
    }

    fn insert(&mut self, template: CompiledTemplate, path: PathBuf) {
        if self.templates.contains_key(template.name()) {
            let error = CordError::DuplicateTemplate {
                name: template.name().to_string(),
                path: path.clone(),
            };
            self.record_failure(path, error);
            return;
        }
        tracing::debug!(
            name = template.name(),
            path = %path.display(),
            parameters = template.parameters().len(),
            "template loaded"
        );
        self.templates.insert(template.name().to_string(), template);
    }

    fn record_failure(&mut self, path: PathBuf, error: CordError) {
        tracing::warn!(path = %path.display(), error = %error, "skipping template");
        self.failures.push(LoadFailure { path, error });
    }

    pub fn get(&self, name: &str) -> Option<&CompiledTemplate> {
        self.templates.get(name)
    }

    /// Like [`Registry::get`], but a miss is a [`CordError::TemplateNotFound`].
    pub fn require(&self, name: &str) -> Result<&CompiledTemplate> {
        self.get(name)
            .ok_or_else(|| CordError::TemplateNotFound(name.to_string()))
    }

    /// Templates in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledTemplate> {
        self.templates.values()
    }

    /// Template names in the order [`Registry::iter`] yields them.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }
}
