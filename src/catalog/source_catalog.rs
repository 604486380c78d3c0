// src/catalog/source_catalog.rs

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, bail};
use tracing::debug;

use super::{ClassCatalog, EntryPoint, TaskClass};
use crate::fs::FileSystem;
use crate::source::scan_classes;

/// Catalog backed by registered classes plus text-scanned source files.
///
/// Classes passed to [`SourceCatalog::register`] play the part of classes
/// already loaded in the host process; [`ClassCatalog::load_file`] adds the
/// classes a source file declares.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    fs: Arc<dyn FileSystem>,
    entry_point: String,
    classes: Arc<RwLock<BTreeMap<String, TaskClass>>>,
}

impl SourceCatalog {
    pub fn new(fs: Arc<dyn FileSystem>, entry_point: impl Into<String>) -> Self {
        Self {
            fs,
            entry_point: entry_point.into(),
            classes: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Make a class known without loading any file.
    pub fn register(&self, class: TaskClass) {
        self.write().insert(class.name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, TaskClass>> {
        self.classes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, TaskClass>> {
        self.classes.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ClassCatalog for SourceCatalog {
    fn list_by_marker(&self, markers: &[String]) -> Vec<TaskClass> {
        self.read()
            .values()
            .filter(|class| class.has_marker(markers))
            .cloned()
            .collect()
    }

    fn resolve(&self, name: &str) -> Option<TaskClass> {
        self.read().get(name).cloned()
    }

    fn load_file(&self, path: &Path) -> Result<()> {
        let text = self.fs.read_to_string(path)?;
        let scanned = scan_classes(&text, &self.entry_point);
        if scanned.is_empty() {
            bail!("no class declaration found in {:?}", path);
        }

        let mut classes = self.write();
        for class in scanned {
            debug!(class = %class.name, ?path, "loaded class from source");
            let entry_point = class.entry_point.map(|e| EntryPoint {
                params: e.params,
                source_path: path.to_path_buf(),
                line: Some(e.line),
            });
            classes.insert(
                class.name.clone(),
                TaskClass {
                    name: class.name,
                    markers: class.includes,
                    entry_point,
                },
            );
        }
        Ok(())
    }
}
