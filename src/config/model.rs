// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::fs::FileSystem;
use crate::signature::SignatureLayout;

/// Configuration exactly as read from a TOML file.
///
/// ```toml
/// project_root = "."
///
/// [discovery]
/// job_paths = ["app/sidekiq_jobs", "app/reports"]
/// markers = ["Sidekiq::Job", "Sidekiq::Worker"]
/// include = ["*.rb"]
///
/// [signatures]
/// entry_point = "perform"
/// root = "sig"
/// extension = "rbs"
/// strip_prefix = "app"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Directory task paths are relative to. Relative values are resolved
    /// against the config file's directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    #[serde(default)]
    pub discovery: DiscoverySection,

    #[serde(default)]
    pub signatures: SignatureSection,
}

/// Validated configuration. Build it with `ConfigFile::try_from`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub project_root: PathBuf,
    pub discovery: DiscoverySection,
    pub signatures: SignatureSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        project_root: PathBuf,
        discovery: DiscoverySection,
        signatures: SignatureSection,
    ) -> Self {
        Self {
            project_root,
            discovery,
            signatures,
        }
    }

    /// Resolve `path` against the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Configured job directories that exist, resolved against the project
    /// root. Anything else is logged and dropped.
    pub fn existing_job_paths(&self, fs: &dyn FileSystem) -> Vec<PathBuf> {
        self.discovery
            .job_paths
            .as_slice()
            .iter()
            .map(|p| self.resolve(p))
            .filter(|p| {
                let is_dir = fs.is_dir(p);
                if !is_dir {
                    warn!(path = ?p, "ignoring job path: not a directory");
                }
                is_dir
            })
            .collect()
    }

    pub fn signature_layout(&self) -> SignatureLayout {
        SignatureLayout::new(&self.project_root, &self.signatures)
    }
}

/// `[discovery]` section: where tasks come from.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySection {
    /// Directories scanned for task files; a single string is accepted.
    #[serde(default = "default_job_paths")]
    pub job_paths: JobPaths,

    /// Capability names marking a class as a task.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    /// Glob patterns (matched against file names) selecting task files.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            job_paths: default_job_paths(),
            markers: default_markers(),
            include: default_include(),
        }
    }
}

/// `job_paths = "app/jobs"` or `job_paths = ["app/jobs", "lib/jobs"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JobPaths {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl JobPaths {
    pub fn as_slice(&self) -> &[PathBuf] {
        match self {
            JobPaths::One(path) => std::slice::from_ref(path),
            JobPaths::Many(paths) => paths,
        }
    }
}

fn default_job_paths() -> JobPaths {
    JobPaths::Many(vec![PathBuf::from("app/sidekiq")])
}

fn default_markers() -> Vec<String> {
    vec!["Sidekiq::Job".to_string(), "Sidekiq::Worker".to_string()]
}

fn default_include() -> Vec<String> {
    vec!["*.rb".to_string()]
}

/// `[signatures]` section: how parameter types are looked up.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureSection {
    /// Name of the method a task runs.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Root of the signature tree, relative to the project root.
    #[serde(default = "default_signature_root")]
    pub root: PathBuf,

    /// Signature file extension, without the dot.
    #[serde(default = "default_signature_extension")]
    pub extension: String,

    /// Leading source directory that has no counterpart in the signature
    /// tree (`app/jobs/x.rb` ↔ `sig/jobs/x.rbs`).
    #[serde(default = "default_strip_prefix")]
    pub strip_prefix: Option<String>,
}

impl Default for SignatureSection {
    fn default() -> Self {
        Self {
            entry_point: default_entry_point(),
            root: default_signature_root(),
            extension: default_signature_extension(),
            strip_prefix: default_strip_prefix(),
        }
    }
}

fn default_entry_point() -> String {
    "perform".to_string()
}

fn default_signature_root() -> PathBuf {
    PathBuf::from("sig")
}

fn default_signature_extension() -> String {
    "rbs".to_string()
}

fn default_strip_prefix() -> Option<String> {
    Some("app".to_string())
}
