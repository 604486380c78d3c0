// src/signature/mod.rs

//! Resolution of the types each entry-point parameter accepts.
//!
//! Three readers are tried in priority order, first available wins:
//!
//! 1. [`formal::FormalSignatureAdapter`]: a companion signature file.
//! 2. [`inline_doc::InlineDocAdapter`]: `@param` tags above the entry point.
//! 3. [`default::DefaultAdapter`]: every kind, always available.
//!
//! A reader is available when it found at least one parameter declaration.
//! Readers that cannot make sense of their input report themselves
//! unavailable and the chain falls through; they never guess.

pub mod default;
pub mod formal;
pub mod inline_doc;
pub mod vocabulary;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::EntryPoint;
use crate::config::model::SignatureSection;
use crate::fs::FileSystem;
use crate::types::TypeSet;

pub use default::DefaultAdapter;
pub use formal::FormalSignatureAdapter;
pub use inline_doc::InlineDocAdapter;

/// The query interface every reader implements.
pub trait ParamTypeReader {
    /// `Some(self)` when the reader found declarations for this task.
    fn available(&self) -> Option<&Self>;

    /// Allowed kinds for `name`; the full universe when `name` is unknown
    /// to this reader. Never empty.
    fn allowed_types_for(&self, name: &str) -> TypeSet;
}

/// Where signature files live relative to task sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureLayout {
    /// Directory task source paths are relative to.
    pub project_root: PathBuf,
    /// Root of the signature tree.
    pub signature_root: PathBuf,
    /// Extension of signature files, without the dot.
    pub extension: String,
    /// Leading directory dropped from the source path before mapping.
    pub strip_prefix: Option<PathBuf>,
    /// Name of the entry point method.
    pub entry_point: String,
}

impl SignatureLayout {
    pub fn new(project_root: impl Into<PathBuf>, section: &SignatureSection) -> Self {
        let project_root = project_root.into();
        Self {
            signature_root: project_root.join(&section.root),
            project_root,
            extension: section.extension.trim_start_matches('.').to_string(),
            strip_prefix: section
                .strip_prefix
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            entry_point: section.entry_point.clone(),
        }
    }

    /// Map a task source path into the signature tree:
    /// `<root>/app/jobs/x.rb` → `<root>/sig/jobs/x.rbs`.
    ///
    /// `None` when an absolute source path lies outside the project root.
    pub fn signature_path_for(&self, source_path: &Path) -> Option<PathBuf> {
        let relative = match source_path.strip_prefix(&self.project_root) {
            Ok(rel) => rel,
            Err(_) if source_path.is_relative() => source_path,
            Err(_) => return None,
        };
        let relative = match &self.strip_prefix {
            Some(prefix) => relative.strip_prefix(prefix).unwrap_or(relative),
            None => relative,
        };
        Some(
            self.signature_root
                .join(relative)
                .with_extension(&self.extension),
        )
    }
}

/// Which reader supplied a task's types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    SignatureFile,
    InlineDocs,
    Default,
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReaderKind::SignatureFile => "signature file",
            ReaderKind::InlineDocs => "inline docs",
            ReaderKind::Default => "default",
        })
    }
}

/// The reader chosen for one task.
#[derive(Debug, Clone)]
pub enum SignatureReader {
    Formal(FormalSignatureAdapter),
    InlineDoc(InlineDocAdapter),
    Default(DefaultAdapter),
}

impl SignatureReader {
    /// Pick the first available reader for `entry_point`.
    pub fn resolve(fs: &dyn FileSystem, layout: &SignatureLayout, entry_point: &EntryPoint) -> Self {
        let formal = FormalSignatureAdapter::load(fs, layout, &entry_point.source_path);
        if formal.available().is_some() {
            return SignatureReader::Formal(formal);
        }

        let inline = InlineDocAdapter::load(
            fs,
            &entry_point.source_path,
            entry_point.line,
            &layout.entry_point,
        );
        if inline.available().is_some() {
            return SignatureReader::InlineDoc(inline);
        }

        SignatureReader::Default(DefaultAdapter)
    }

    pub fn kind(&self) -> ReaderKind {
        match self {
            SignatureReader::Formal(_) => ReaderKind::SignatureFile,
            SignatureReader::InlineDoc(_) => ReaderKind::InlineDocs,
            SignatureReader::Default(_) => ReaderKind::Default,
        }
    }
}

impl ParamTypeReader for SignatureReader {
    fn available(&self) -> Option<&Self> {
        Some(self)
    }

    fn allowed_types_for(&self, name: &str) -> TypeSet {
        match self {
            SignatureReader::Formal(r) => r.allowed_types_for(name),
            SignatureReader::InlineDoc(r) => r.allowed_types_for(name),
            SignatureReader::Default(r) => r.allowed_types_for(name),
        }
    }
}
