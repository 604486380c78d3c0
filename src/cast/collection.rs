// src/cast/collection.rs

use serde_json::Value;
use tracing::debug;

use super::relaxed;

pub fn is_array(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('[') && value.ends_with(']')
}

pub fn is_hash(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('{') && value.ends_with('}')
}

pub fn parse_array(value: &str) -> Option<Value> {
    if !is_array(value) {
        return None;
    }
    parse_as(value, "array").filter(Value::is_array)
}

pub fn parse_hash(value: &str) -> Option<Value> {
    if !is_hash(value) {
        return None;
    }
    parse_as(value, "hash").filter(Value::is_object)
}

fn parse_as(value: &str, what: &str) -> Option<Value> {
    match relaxed::parse(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(%err, value, "value is not a valid {what}");
            None
        }
    }
}
