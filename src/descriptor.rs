// src/descriptor.rs

//! One invocable task: its parameters, their allowed types, and the
//! conversion of raw named arguments into the ordered payload the queue
//! expects.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cast;
use crate::catalog::{ParamKind, TaskClass};
use crate::fs::FileSystem;
use crate::signature::{ParamTypeReader, ReaderKind, SignatureLayout, SignatureReader};
use crate::types::TypeSet;

/// What a caller needs to know to supply one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    /// 0-based, in declaration order.
    pub position: usize,
    pub required: bool,
    /// Never empty.
    pub allowed_types: TypeSet,
}

/// A named argument as it arrives from an untyped channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArgument {
    pub name: String,
    pub value: String,
    /// Declared type name, e.g. `"integer"`.
    pub type_name: String,
}

impl RawArgument {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            type_name: type_name.into(),
        }
    }
}

/// Outcome of [`TaskDescriptor::build_perform_params`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformParams {
    pub success: bool,
    /// Every problem found, in parameter order.
    pub errors: Vec<String>,
    /// Positional values, present only on success.
    pub params: Option<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct TaskDescriptor {
    task_class: TaskClass,
    source_file_path: PathBuf,
    parameters: Vec<ParameterSpec>,
    reader_kind: ReaderKind,
}

impl TaskDescriptor {
    /// Introspect `class` and resolve the allowed types of its parameters.
    ///
    /// Fails when the class has no entry point or declares a named
    /// parameter; the registry filters those out before getting here.
    pub fn new(class: TaskClass, fs: &dyn FileSystem, layout: &SignatureLayout) -> Result<Self> {
        let Some(entry_point) = class.entry_point.as_ref() else {
            bail!("{} has no `{}` method", class.name, layout.entry_point);
        };
        if let Some(named) = entry_point.params.iter().find(|p| p.kind.is_named()) {
            bail!(
                "{} takes named parameter `{}`, which cannot be passed positionally",
                class.name,
                named.name
            );
        }

        let reader = SignatureReader::resolve(fs, layout, entry_point);
        debug!(task = %class.name, reader = %reader.kind(), "resolved parameter types");

        let parameters = entry_point
            .params
            .iter()
            .filter(|p| p.kind.is_positional())
            .enumerate()
            .map(|(position, param)| ParameterSpec {
                name: param.name.clone(),
                position,
                required: param.kind == ParamKind::Required,
                allowed_types: reader.allowed_types_for(&param.name),
            })
            .collect();

        Ok(Self {
            source_file_path: entry_point.source_path.clone(),
            reader_kind: reader.kind(),
            task_class: class,
            parameters,
        })
    }

    /// Fully-qualified class name.
    pub fn name(&self) -> &str {
        &self.task_class.name
    }

    pub fn task_class(&self) -> &TaskClass {
        &self.task_class
    }

    pub fn source_file_path(&self) -> &Path {
        &self.source_file_path
    }

    /// Last component of the source path, for listings.
    pub fn file_name(&self) -> &str {
        self.source_file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("File not found")
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn reader_kind(&self) -> ReaderKind {
        self.reader_kind
    }

    pub fn param_specs(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Turn named string arguments into the entry point's positional
    /// parameters.
    ///
    /// Arguments naming no parameter are ignored. An optional parameter may
    /// be left out only together with every parameter after it.
    pub fn build_perform_params(&self, args: &[RawArgument]) -> PerformParams {
        let supplied: Vec<Option<&RawArgument>> = self
            .parameters
            .iter()
            .map(|spec| args.iter().find(|a| a.name == spec.name))
            .collect();
        let last_supplied = supplied.iter().rposition(Option::is_some);

        let mut errors = Vec::new();
        let mut params = Vec::with_capacity(self.parameters.len());

        for (spec, arg) in self.parameters.iter().zip(&supplied) {
            let Some(arg) = arg else {
                let omittable = !spec.required && last_supplied.is_none_or(|last| last < spec.position);
                if !omittable {
                    errors.push(format!("Parameter :{} not found", spec.name));
                }
                continue;
            };

            match cast::try_parse_as_named(&arg.value, &arg.type_name) {
                Some(value) => params.push(value),
                None => errors.push(format!(
                    "Argument {} is not a valid {}",
                    spec.name, arg.type_name
                )),
            }
        }

        let success = errors.is_empty();
        PerformParams {
            success,
            errors,
            params: success.then_some(params),
        }
    }
}
