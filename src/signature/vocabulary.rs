// src/signature/vocabulary.rs

//! Keyword detection shared by the signature-file and inline-doc readers.

use crate::types::{TypeKind, TypeSet};

/// Keywords per kind, checked in this order. Detection is by substring, so
/// `"Array[Integer] | nil"` mentions `Array` and `Integer`.
const VOCABULARY: [(TypeKind, &[&str]); 5] = [
    (TypeKind::Integer, &["Integer"]),
    (TypeKind::Number, &["Numeric", "Number", "Float"]),
    (TypeKind::Boolean, &["Boolean", "bool", "TrueClass", "FalseClass"]),
    (TypeKind::Hash, &["Hash"]),
    (TypeKind::String, &["String"]),
];

/// Build the type set a declared type expression allows.
///
/// `Array` is checked first; when present, every bracketed group is removed
/// before the remaining keywords are scanned, so element types never leak
/// into the outer set: `"Array[Integer | String] | Integer"` gives
/// `array, integer`.
pub fn detect_types(expr: &str) -> TypeSet {
    let mut set = TypeSet::new();
    let mut expr = expr.to_string();

    if expr.contains("Array") {
        set.insert(TypeKind::Array);
        expr = strip_groups(&expr, &[('[', ']')]);
    }

    for (kind, keywords) in VOCABULARY {
        if keywords.iter().any(|kw| expr.contains(kw)) {
            set.insert(kind);
        }
    }
    set
}

/// Remove every (possibly nested) group delimited by one of `pairs`,
/// delimiters included. An unclosed group runs to the end of the text.
pub fn strip_groups(text: &str, pairs: &[(char, char)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<char> = Vec::new();

    for c in text.chars() {
        if let Some(&(_, close)) = pairs.iter().find(|(open, _)| *open == c) {
            stack.push(close);
            continue;
        }
        if let Some(&expected) = stack.last() {
            if c == expected {
                stack.pop();
            }
            continue;
        }
        out.push(c);
    }
    out
}
