// src/signature/inline_doc.rs

//! Types from `@param` tags in the comment block above the entry point.
//!
//! ```ruby
//! # Sends the invoice.
//! # @param account_id [Integer] the account
//! # @param lines [Array<Hash>, nil] invoice lines
//! def perform(account_id, lines)
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use super::ParamTypeReader;
use super::vocabulary::{detect_types, strip_groups};
use crate::fs::FileSystem;
use crate::source::find_declaration_line;
use crate::types::TypeSet;

const PARAM_TAG: &str = "@param";

#[derive(Debug, Clone, Default)]
pub struct InlineDocAdapter {
    param_types: HashMap<String, TypeSet>,
}

impl InlineDocAdapter {
    /// Read the doc block above the entry point declared in `source_path`.
    ///
    /// `line` is the 1-based declaration line when the host knows it;
    /// otherwise the first `def <entry_point>` line is used.
    pub fn load(
        fs: &dyn FileSystem,
        source_path: &Path,
        line: Option<usize>,
        entry_point: &str,
    ) -> Self {
        let text = match fs.read_to_string(source_path) {
            Ok(text) => text,
            Err(err) => {
                warn!(?source_path, "unreadable task source: {err:#}");
                return Self::default();
            }
        };

        let Some(line) = line.or_else(|| find_declaration_line(&text, entry_point)) else {
            debug!(?source_path, entry_point, "entry point declaration not found");
            return Self::default();
        };

        let param_types = parse_doc_block(&text, line);
        debug!(?source_path, params = param_types.len(), "parsed inline docs");
        Self { param_types }
    }
}

impl ParamTypeReader for InlineDocAdapter {
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

/// Collect `@param` tags reading upward from `decl_line` (1-based,
/// inclusive) until the first blank line.
pub fn parse_doc_block(text: &str, decl_line: usize) -> HashMap<String, TypeSet> {
    let lines: Vec<&str> = text.lines().collect();
    let last = decl_line.min(lines.len());
    let mut map = HashMap::new();

    for line in lines[..last].iter().rev() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((name, types)) = parse_param_tag(line) {
            // Reading bottom-up: the tag nearest the declaration wins.
            map.entry(name).or_insert(types);
        }
    }
    map
}

/// Parse `@param name [Types] text` or `@param [Types] name text`.
pub fn parse_param_tag(line: &str) -> Option<(String, TypeSet)> {
    let at = line.find(PARAM_TAG)?;
    let rest = line[at + PARAM_TAG.len()..].trim_start();

    let (name, type_expr) = if rest.starts_with('[') {
        let (types, after) = bracketed(rest)?;
        (first_word(after)?, types)
    } else {
        let raw = rest.split_whitespace().next()?;
        let after = rest[raw.len()..].trim_start();
        let (types, _) = bracketed(after)?;
        (first_word(raw)?, types)
    };

    let flattened = strip_groups(type_expr, &[('<', '>'), ('{', '}')]);
    Some((name.to_string(), detect_types(&flattened)))
}

/// Split `"[A, B<C>] rest"` into `("A, B<C>", " rest")`.
fn bracketed(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('[') {
        return None;
    }
    let mut depth = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

fn first_word(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?;
    let word = word.trim_end_matches([',', ':', '.']);
    (!word.is_empty() && !word.starts_with('[')).then_some(word)
}
