// src/signature/default.rs

use super::ParamTypeReader;
use crate::types::TypeSet;

/// Reader of last resort: every parameter accepts every kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAdapter;

impl ParamTypeReader for DefaultAdapter {
    fn available(&self) -> Option<&Self> {
        Some(self)
    }

    fn allowed_types_for(&self, _name: &str) -> TypeSet {
        TypeSet::all()
    }
}
