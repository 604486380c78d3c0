// src/catalog/mod.rs

//! The host-runtime side of discovery.
//!
//! The registry never constructs task classes itself; it asks a
//! [`ClassCatalog`] which classes are loaded, to load more from disk, and to
//! resolve names. [`SourceCatalog`] is the implementation shipped here: it
//! "loads" a file by text-scanning it (see [`crate::source`]).

pub mod source_catalog;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use source_catalog::SourceCatalog;

/// Canonical fully-qualified class name, e.g. `"Billing::InvoiceJob"`.
pub type ClassName = String;

/// How an entry-point parameter is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `name`
    Required,
    /// `name = default`
    Optional,
    /// `*names`
    Rest,
    /// `name:`
    KeywordRequired,
    /// `name: default`
    Keyword,
    /// `**options`
    KeywordRest,
    /// `&block`
    Block,
}

impl ParamKind {
    /// Keyword-style parameters cannot be filled positionally.
    pub fn is_named(self) -> bool {
        matches!(
            self,
            ParamKind::KeywordRequired | ParamKind::Keyword | ParamKind::KeywordRest
        )
    }

    pub fn is_required(self) -> bool {
        matches!(self, ParamKind::Required)
    }

    /// Whether a caller supplies a value for this parameter at all.
    pub fn is_positional(self) -> bool {
        matches!(self, ParamKind::Required | ParamKind::Optional | ParamKind::Rest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryParam {
    pub name: String,
    pub kind: ParamKind,
}

impl EntryParam {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The designated entry point of a task class, as introspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Parameters in declaration order.
    pub params: Vec<EntryParam>,
    /// File declaring the entry point.
    pub source_path: PathBuf,
    /// 1-based line of the declaration, when known.
    pub line: Option<usize>,
}

/// Handle to a loaded class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskClass {
    pub name: ClassName,
    /// Capabilities the class declares (mixins, marker traits, ...).
    pub markers: Vec<String>,
    /// `None` when the class has no entry point.
    pub entry_point: Option<EntryPoint>,
}

impl TaskClass {
    pub fn has_marker(&self, markers: &[String]) -> bool {
        self.markers.iter().any(|m| markers.contains(m))
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.entry_point.as_ref().map(|e| e.source_path.as_path())
    }
}

/// Registry of loaded classes.
///
/// Implementations use interior mutability: `load_file` is called through a
/// shared reference while the task registry rescans.
pub trait ClassCatalog: Send + Sync + std::fmt::Debug {
    /// Every loaded class declaring at least one of `markers`, in a stable
    /// order.
    fn list_by_marker(&self, markers: &[String]) -> Vec<TaskClass>;

    /// Look a class up by fully-qualified name.
    fn resolve(&self, name: &str) -> Option<TaskClass>;

    /// Load the classes a file defines. Loading the same file twice is a
    /// no-op apart from refreshing its classes.
    fn load_file(&self, path: &Path) -> Result<()>;
}
