// src/registry.rs

//! Discovery and caching of invocable tasks.
//!
//! Candidates come from two places, in this order:
//!
//! 1. classes the catalog already holds that declare a task marker;
//! 2. files in the configured job directories, loaded into the catalog on
//!    demand.
//!
//! Candidates are deduplicated by name (first occurrence wins), filtered to
//! the ones that can be invoked positionally, and turned into
//! [`TaskDescriptor`]s. A class that fails any step is logged and left out;
//! discovery itself never fails.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use globset::GlobSet;
use tracing::{debug, info, warn};

use crate::catalog::{ClassCatalog, SourceCatalog, TaskClass};
use crate::config::{ConfigFile, build_file_filter};
use crate::descriptor::TaskDescriptor;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::signature::SignatureLayout;
use crate::source::class_name_from_source;

type JobList = Arc<Vec<TaskDescriptor>>;

#[derive(Debug)]
pub struct TaskRegistry {
    config: ConfigFile,
    layout: SignatureLayout,
    file_filter: GlobSet,
    fs: Arc<dyn FileSystem>,
    catalog: Arc<dyn ClassCatalog>,
    /// `None` until the first load.
    jobs: RwLock<Option<JobList>>,
}

impl TaskRegistry {
    pub fn new(
        config: ConfigFile,
        fs: Arc<dyn FileSystem>,
        catalog: Arc<dyn ClassCatalog>,
    ) -> Result<Self> {
        let file_filter = build_file_filter(&config.discovery.include)?;
        Ok(Self {
            layout: config.signature_layout(),
            config,
            file_filter,
            fs,
            catalog,
            jobs: RwLock::new(None),
        })
    }

    /// Registry over a fresh [`SourceCatalog`] reading through `fs`.
    pub fn with_source_catalog(config: ConfigFile, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let catalog = SourceCatalog::new(fs.clone(), config.signatures.entry_point.clone());
        Self::new(config, fs, Arc::new(catalog))
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Every valid task, loading them on first use.
    pub fn jobs(&self) -> JobList {
        if let Some(jobs) = self.cached() {
            return jobs;
        }
        self.reload_jobs()
    }

    /// Rediscover every task and replace the cached list in one step.
    pub fn reload_jobs(&self) -> JobList {
        let jobs = Arc::new(self.load_jobs());
        *self.jobs.write().unwrap_or_else(|e| e.into_inner()) = Some(jobs.clone());
        jobs
    }

    /// Look a task up by fully-qualified name in the cached list.
    ///
    /// Never triggers a load: before the first [`jobs`](Self::jobs) or
    /// [`reload_jobs`](Self::reload_jobs) call this always returns `None`.
    pub fn job_by_name(&self, name: &str) -> Option<TaskDescriptor> {
        self.cached()?.iter().find(|j| j.name() == name).cloned()
    }

    fn cached(&self) -> Option<JobList> {
        self.jobs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn load_jobs(&self) -> Vec<TaskDescriptor> {
        let mut seen = HashSet::new();
        let candidates: Vec<TaskClass> = self
            .catalog
            .list_by_marker(&self.config.discovery.markers)
            .into_iter()
            .chain(self.classes_from_job_paths())
            .filter(|class| seen.insert(class.name.clone()))
            .collect();

        let total = candidates.len();
        let jobs: Vec<TaskDescriptor> = candidates
            .into_iter()
            .filter(|class| self.is_valid_job(class))
            .filter_map(|class| {
                let name = class.name.clone();
                match TaskDescriptor::new(class, self.fs.as_ref(), &self.layout) {
                    Ok(descriptor) => Some(descriptor),
                    Err(err) => {
                        warn!(task = %name, "skipping task: {err:#}");
                        None
                    }
                }
            })
            .collect();

        info!(candidates = total, jobs = jobs.len(), "loaded jobs");
        jobs
    }

    fn classes_from_job_paths(&self) -> Vec<TaskClass> {
        self.config
            .existing_job_paths(self.fs.as_ref())
            .iter()
            .flat_map(|dir| self.classes_from_dir(dir))
            .collect()
    }

    fn classes_from_dir(&self, dir: &Path) -> Vec<TaskClass> {
        let entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(?dir, "cannot list job directory: {err:#}");
                return Vec::new();
            }
        };

        entries
            .iter()
            .filter(|path| self.fs.is_file(path))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| self.file_filter.is_match(name))
            })
            .filter_map(|path| self.class_from_file(path))
            .collect()
    }

    fn class_from_file(&self, path: &Path) -> Option<TaskClass> {
        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(?path, "skipping unreadable file: {err:#}");
                return None;
            }
        };
        let Some(name) = class_name_from_source(&text) else {
            debug!(?path, "no class declaration");
            return None;
        };

        if self.catalog.resolve(&name).is_none() {
            if let Err(err) = self.catalog.load_file(path) {
                // Resolution is still attempted: the class may have been
                // defined before the failure.
                warn!(?path, class = %name, "loading file failed: {err:#}");
            }
        }

        let class = self.catalog.resolve(&name);
        if class.is_none() {
            debug!(?path, class = %name, "class not found after loading");
        }
        class
    }

    fn is_valid_job(&self, class: &TaskClass) -> bool {
        if !class.has_marker(&self.config.discovery.markers) {
            debug!(task = %class.name, "not a task: no marker");
            return false;
        }
        let Some(entry_point) = &class.entry_point else {
            debug!(
                task = %class.name,
                entry_point = %self.config.signatures.entry_point,
                "not a task: no entry point"
            );
            return false;
        };
        if let Some(param) = entry_point.params.iter().find(|p| p.kind.is_named()) {
            debug!(task = %class.name, param = %param.name, "not a task: named parameter");
            return false;
        }
        true
    }
}
