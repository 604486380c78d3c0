#![allow(dead_code)]

use std::path::{Path, PathBuf};

use joblaunch::catalog::{EntryParam, EntryPoint, ParamKind, TaskClass};
use joblaunch::config::{ConfigFile, JobPaths, RawConfigFile};
use joblaunch::fs::mock::MockFileSystem;

/// Marker most fixtures declare.
pub const JOB_MARKER: &str = "Sidekiq::Job";

/// Builder for `ConfigFile` rooted at a fixed project directory.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    job_paths: Vec<PathBuf>,
}

impl ConfigFileBuilder {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            config: RawConfigFile {
                project_root: Some(project_root.into()),
                ..RawConfigFile::default()
            },
            job_paths: Vec::new(),
        }
    }

    /// Add a job directory; the first call replaces the default list.
    pub fn job_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.job_paths.push(path.into());
        self
    }

    pub fn markers(mut self, markers: &[&str]) -> Self {
        self.config.discovery.markers = markers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn include(mut self, patterns: &[&str]) -> Self {
        self.config.discovery.include = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn strip_prefix(mut self, prefix: Option<&str>) -> Self {
        self.config.signatures.strip_prefix = prefix.map(str::to_string);
        self
    }

    pub fn build(mut self) -> ConfigFile {
        if !self.job_paths.is_empty() {
            self.config.discovery.job_paths = JobPaths::Many(self.job_paths);
        }
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Builder for `TaskClass` handles registered directly in a catalog.
pub struct TaskClassBuilder {
    class: TaskClass,
    source_path: PathBuf,
    line: Option<usize>,
    params: Option<Vec<EntryParam>>,
}

impl TaskClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            class: TaskClass {
                name: name.to_string(),
                markers: Vec::new(),
                entry_point: None,
            },
            source_path: PathBuf::from(format!("{}.rb", name.replace("::", "/").to_lowercase())),
            line: None,
            params: None,
        }
    }

    /// A class carrying [`JOB_MARKER`] and an entry point with no parameters.
    pub fn job(name: &str) -> Self {
        Self::new(name).marker(JOB_MARKER).entry_point()
    }

    pub fn marker(mut self, marker: &str) -> Self {
        self.class.markers.push(marker.to_string());
        self
    }

    /// Give the class an entry point (parameters are added with `param`).
    pub fn entry_point(mut self) -> Self {
        self.params.get_or_insert_with(Vec::new);
        self
    }

    pub fn param(mut self, name: &str, kind: ParamKind) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push(EntryParam::new(name, kind));
        self
    }

    pub fn required(self, name: &str) -> Self {
        self.param(name, ParamKind::Required)
    }

    pub fn optional(self, name: &str) -> Self {
        self.param(name, ParamKind::Optional)
    }

    pub fn source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.source_path = path.as_ref().to_path_buf();
        self
    }

    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn build(mut self) -> TaskClass {
        self.class.entry_point = self.params.map(|params| EntryPoint {
            params,
            source_path: self.source_path,
            line: self.line,
        });
        self.class
    }
}

/// Builder for an in-memory project tree.
pub struct SourceTreeBuilder {
    root: PathBuf,
    fs: MockFileSystem,
}

impl SourceTreeBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let fs = MockFileSystem::new();
        fs.add_dir(&root);
        Self { root, fs }
    }

    /// Add a file at `rel` (relative to the root).
    pub fn file(self, rel: &str, content: &str) -> Self {
        self.fs.add_file(self.root.join(rel), content);
        self
    }

    /// Add an empty directory at `rel`.
    pub fn dir(self, rel: &str) -> Self {
        self.fs.add_dir(self.root.join(rel));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn build(self) -> MockFileSystem {
        self.fs
    }
}
