// src/cast/scalar.rs

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[+-]?[0-9]+\z").expect("static integer pattern"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[+-]?[0-9]+(\.[0-9]+)?\z").expect("static number pattern"));

pub fn is_integer(value: &str) -> bool {
    INTEGER_RE.is_match(value)
}

pub fn is_number(value: &str) -> bool {
    NUMBER_RE.is_match(value)
}

/// Signed base-10 integer. Values outside `i64` do not cast.
pub fn parse_integer(value: &str) -> Option<Value> {
    if !is_integer(value) {
        return None;
    }
    value.parse::<i64>().ok().map(Value::from)
}

/// Floating-point value; always produced as a float, even for `"1"`.
pub fn parse_number(value: &str) -> Option<Value> {
    if !is_number(value) {
        return None;
    }
    let parsed = value.parse::<f64>().ok()?;
    Number::from_f64(parsed).map(Value::Number)
}

pub fn parse_boolean(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
