// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six argument kinds a task parameter can accept.
///
/// These mirror what a JSON-backed job queue can carry: strings, integers,
/// floats, booleans, arrays and objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Hash,
}

impl TypeKind {
    /// The full universe, in its canonical order.
    pub const ALL: [TypeKind; 6] = [
        TypeKind::String,
        TypeKind::Integer,
        TypeKind::Number,
        TypeKind::Boolean,
        TypeKind::Array,
        TypeKind::Hash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::String => "string",
            TypeKind::Integer => "integer",
            TypeKind::Number => "number",
            TypeKind::Boolean => "boolean",
            TypeKind::Array => "array",
            TypeKind::Hash => "hash",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(TypeKind::String),
            "integer" => Ok(TypeKind::Integer),
            "number" => Ok(TypeKind::Number),
            "boolean" => Ok(TypeKind::Boolean),
            "array" => Ok(TypeKind::Array),
            "hash" => Ok(TypeKind::Hash),
            other => Err(format!(
                "invalid argument type: {other} (expected one of string, integer, number, boolean, array, hash)"
            )),
        }
    }
}

/// Ordered, duplicate-free set of [`TypeKind`]s.
///
/// Order is the order in which kinds were detected, which keeps listings
/// stable. An empty set never escapes a reader: see [`TypeSet::or_all`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TypeSet(Vec<TypeKind>);

impl TypeSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Every kind, in canonical order.
    pub fn all() -> Self {
        Self(TypeKind::ALL.to_vec())
    }

    pub fn insert(&mut self, kind: TypeKind) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
        }
    }

    pub fn contains(&self, kind: TypeKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeKind> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[TypeKind] {
        &self.0
    }

    /// Fall back to the full universe when nothing was detected.
    pub fn or_all(self) -> Self {
        if self.is_empty() { Self::all() } else { self }
    }
}

impl FromIterator<TypeKind> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeKind>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|k| k.as_str()).collect();
        write!(f, "{}", names.join(" | "))
    }
}
