// src/signature/formal.rs

//! Types from a companion signature file.
//!
//! For a task defined in `app/jobs/billing/invoice_job.rb` the reader looks
//! for `sig/jobs/billing/invoice_job.rbs` (with the default layout) and
//! reads the entry point's declaration:
//!
//! ```rbs
//! def perform: (Integer account_id, ?bool dry_run) -> void
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::vocabulary::detect_types;
use super::{ParamTypeReader, SignatureLayout};
use crate::fs::FileSystem;
use crate::source::split_top_level;
use crate::types::TypeSet;

#[derive(Debug, Clone, Default)]
pub struct FormalSignatureAdapter {
    signature_path: Option<PathBuf>,
    param_types: HashMap<String, TypeSet>,
}

impl FormalSignatureAdapter {
    /// Locate and parse the signature file for `source_path`.
    ///
    /// Never fails: a missing or unparseable file leaves the adapter
    /// unavailable.
    pub fn load(fs: &dyn FileSystem, layout: &SignatureLayout, source_path: &Path) -> Self {
        let Some(signature_path) = layout.signature_path_for(source_path) else {
            debug!(?source_path, "source file is outside the project root");
            return Self::default();
        };
        if !fs.is_file(&signature_path) {
            return Self::default();
        }

        let text = match fs.read_to_string(&signature_path) {
            Ok(text) => text,
            Err(err) => {
                warn!(?signature_path, "unreadable signature file: {err:#}");
                return Self::default();
            }
        };

        let param_types = parse_signature(&text, &layout.entry_point);
        debug!(
            ?signature_path,
            params = param_types.len(),
            "parsed signature file"
        );
        Self {
            signature_path: Some(signature_path),
            param_types,
        }
    }

    pub fn signature_path(&self) -> Option<&Path> {
        self.signature_path.as_deref()
    }
}

impl ParamTypeReader for FormalSignatureAdapter {
    fn available(&self) -> Option<&Self> {
        (!self.param_types.is_empty()).then_some(self)
    }

    fn allowed_types_for(&self, name: &str) -> TypeSet {
        self.param_types
            .get(name)
            .cloned()
            .unwrap_or_default()
            .or_all()
    }
}

/// Parse the `<entry_point>:` declaration into `name -> types`.
///
/// Only positional fragments that carry a parameter name are kept;
/// keyword fragments (`count: Integer`) and unnamed ones are skipped.
pub fn parse_signature(text: &str, entry_point: &str) -> HashMap<String, TypeSet> {
    let mut map = HashMap::new();
    let Some(decl) = declaration_block(text, entry_point) else {
        return map;
    };
    let Some(params) = parenthesised(&decl) else {
        return map;
    };

    for fragment in split_top_level(params, ',') {
        let fragment = fragment.trim();
        let Some((type_expr, name)) = fragment.rsplit_once(char::is_whitespace) else {
            continue;
        };
        let type_expr = type_expr.trim();
        if !is_param_name(name) || type_expr.is_empty() || type_expr.ends_with(':') {
            continue;
        }
        map.insert(name.to_string(), detect_types(type_expr));
    }
    map
}

/// Join the lines from `<entry_point>:` through the first line with `->`.
fn declaration_block(text: &str, entry_point: &str) -> Option<String> {
    let marker = format!("{entry_point}:");
    let mut block: Option<String> = None;

    for line in text.lines() {
        match block.as_mut() {
            None => {
                let Some(start) = instance_declaration(line, &marker) else {
                    continue;
                };
                if start.contains("->") {
                    return Some(start.to_string());
                }
                block = Some(start.to_string());
            }
            Some(acc) => {
                acc.push(' ');
                acc.push_str(line.trim());
                if line.contains("->") {
                    break;
                }
            }
        }
    }
    block
}

/// Contents of the first balanced `( ... )` group.
fn parenthesised(decl: &str) -> Option<&str> {
    let open = decl.find('(')?;
    let mut depth = 0;
    for (i, c) in decl[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&decl[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Text after `def <entry_point>:` when the line declares the instance
/// method. `def self.<entry_point>:` does not match.
fn instance_declaration<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.trim_start()
        .strip_prefix("def")
        .filter(|rest| rest.starts_with(char::is_whitespace))?
        .trim_start()
        .strip_prefix(marker)
}

fn is_param_name(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|c| c.is_lowercase() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
