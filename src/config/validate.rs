// src/config/validate.rs

use std::path::PathBuf;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LauncherError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LauncherError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let project_root = raw.project_root.unwrap_or_else(|| PathBuf::from("."));
        Ok(ConfigFile::new_unchecked(
            project_root,
            raw.discovery,
            raw.signatures,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_markers(cfg)?;
    validate_signatures(cfg)?;
    build_file_filter(&cfg.discovery.include)?;
    Ok(())
}

fn validate_markers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.discovery.markers.is_empty() {
        return Err(LauncherError::ConfigError(
            "[discovery].markers must name at least one task marker".to_string(),
        ));
    }
    if cfg.discovery.markers.iter().any(|m| m.trim().is_empty()) {
        return Err(LauncherError::ConfigError(
            "[discovery].markers must not contain empty names".to_string(),
        ));
    }
    Ok(())
}

fn validate_signatures(cfg: &RawConfigFile) -> Result<()> {
    let entry_point = &cfg.signatures.entry_point;
    let is_identifier = entry_point
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && entry_point.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !is_identifier {
        return Err(LauncherError::ConfigError(format!(
            "[signatures].entry_point must be a method name (got {entry_point:?})"
        )));
    }

    let extension = cfg.signatures.extension.trim_start_matches('.');
    if extension.is_empty() {
        return Err(LauncherError::ConfigError(
            "[signatures].extension must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Compile the `[discovery].include` patterns.
pub fn build_file_filter(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|e| {
            LauncherError::ConfigError(format!("invalid include pattern {pat:?}: {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| LauncherError::ConfigError(format!("building include patterns: {e}")))
}
