// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// path resolution and validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// A relative (or missing) `project_root` is resolved against the directory
/// containing the config file, so the tool behaves the same whatever the
/// current working directory is.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw_config = load_from_path(path)?;

    let config_dir = config_dir(path);
    raw_config.project_root = Some(match raw_config.project_root.take() {
        Some(root) if root.is_absolute() => root,
        Some(root) => config_dir.join(root),
        None => config_dir,
    });

    ConfigFile::try_from(raw_config)
}

/// Default config location: `Joblaunch.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Joblaunch.toml")
}

fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
