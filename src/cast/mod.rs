// src/cast/mod.rs

//! String → typed value conversion for the six [`TypeKind`]s.
//!
//! - [`scalar`] handles `integer`, `number` and `boolean`.
//! - [`collection`] handles `array` and `hash` on top of the lenient
//!   parser in [`relaxed`].
//!
//! Values are produced as [`serde_json::Value`], which is also the shape a
//! job queue payload takes.

pub mod collection;
pub mod relaxed;
pub mod scalar;

use serde_json::Value;

use crate::types::TypeKind;

/// Convert `value` to `kind`, or `None` when it does not fit the kind's
/// grammar (or, for arrays and hashes, when the content is malformed).
pub fn try_parse_as(value: &str, kind: TypeKind) -> Option<Value> {
    match kind {
        TypeKind::String => Some(Value::String(value.to_string())),
        TypeKind::Integer => scalar::parse_integer(value),
        TypeKind::Number => scalar::parse_number(value),
        TypeKind::Boolean => scalar::parse_boolean(value).map(Value::Bool),
        TypeKind::Array => collection::parse_array(value),
        TypeKind::Hash => collection::parse_hash(value),
    }
}

/// Like [`try_parse_as`], but takes the type as the caller supplied it.
///
/// Unknown type names never cast.
pub fn try_parse_as_named(value: &str, type_name: &str) -> Option<Value> {
    let kind = type_name.parse::<TypeKind>().ok()?;
    try_parse_as(value, kind)
}

/// Shape check only: does `value` look like `kind`?
///
/// For arrays and hashes this checks the delimiters, not the content, so a
/// value can validate and still fail to cast.
pub fn validate(value: &str, kind: TypeKind) -> bool {
    match kind {
        TypeKind::String => true,
        TypeKind::Integer => scalar::is_integer(value),
        TypeKind::Number => scalar::is_number(value),
        TypeKind::Boolean => scalar::parse_boolean(value).is_some(),
        TypeKind::Array => collection::is_array(value),
        TypeKind::Hash => collection::is_hash(value),
    }
}
