// src/lib.rs

pub mod cast;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod registry;
pub mod signature;
pub mod source;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::load_and_validate;
use crate::descriptor::{RawArgument, TaskDescriptor};
use crate::errors::LauncherError;
use crate::fs::RealFileSystem;
use crate::registry::TaskRegistry;

pub use crate::descriptor::{ParameterSpec, PerformParams};
pub use crate::types::{TypeKind, TypeSet};

/// High-level entry point used by `main.rs`.
///
/// Loads the config, discovers jobs from disk and runs one subcommand.
/// Listings go to stdout; `build` prints only JSON there.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(Path::new(&args.config))?;
    debug!(project_root = ?cfg.project_root, "configuration loaded");

    let registry = TaskRegistry::with_source_catalog(cfg, Arc::new(RealFileSystem))?;

    match args.command {
        Command::List => {
            let jobs = registry.jobs();
            println!("jobs ({}):", jobs.len());
            for job in jobs.iter() {
                print_job(job);
            }
        }
        Command::Show { name } => {
            let job = find_job(&registry, &name)?;
            print_job(&job);
        }
        Command::Build { name, args } => {
            let job = find_job(&registry, &name)?;
            build_params(&job, &args)?;
        }
    }
    Ok(())
}

fn find_job(registry: &TaskRegistry, name: &str) -> Result<TaskDescriptor> {
    registry.jobs();
    registry
        .job_by_name(name)
        .ok_or_else(|| LauncherError::TaskNotFound(name.to_string()).into())
}

fn build_params(job: &TaskDescriptor, args: &[RawArgument]) -> Result<()> {
    let result = job.build_perform_params(args);
    match result.params {
        Some(params) => {
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(())
        }
        None => {
            for error in &result.errors {
                eprintln!("  - {error}");
            }
            bail!(
                "{} rejected {} argument error(s)",
                job.name(),
                result.errors.len()
            )
        }
    }
}

fn print_job(job: &TaskDescriptor) {
    println!("  - {}", job.name());
    println!("      file: {}", job.file_name());
    println!("      types from: {}", job.reader_kind());
    if job.parameters().is_empty() {
        println!("      params: (none)");
        return;
    }
    println!("      params:");
    for spec in job.parameters() {
        let required = if spec.required { "required" } else { "optional" };
        println!(
            "        {}. {} ({required}): {}",
            spec.position, spec.name, spec.allowed_types
        );
    }
}
