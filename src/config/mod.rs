// src/config/mod.rs

//! Configuration loading and validation for joblaunch.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a config file and resolving the project root.
//! - `validate.rs`: sanity checks and `RawConfigFile` → `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, DiscoverySection, JobPaths, RawConfigFile, SignatureSection};
pub use validate::build_file_filter;
