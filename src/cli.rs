// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::descriptor::RawArgument;

/// Command-line arguments for `joblaunch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "joblaunch",
    version,
    about = "Discover background jobs and build typed parameters to enqueue them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Joblaunch.toml` in the current working directory.
    #[arg(long, global = true, value_name = "PATH", default_value = "Joblaunch.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBLAUNCH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every discovered job with its parameters.
    List,

    /// Show one job.
    Show {
        /// Fully-qualified class name, e.g. `Billing::InvoiceJob`.
        name: String,
    },

    /// Convert named arguments into the job's positional parameters and
    /// print them as JSON.
    Build {
        /// Fully-qualified class name.
        name: String,

        /// Argument as `name=type:value`, e.g. `--arg count=integer:3`.
        #[arg(long = "arg", value_name = "NAME=TYPE:VALUE", value_parser = parse_raw_argument)]
        args: Vec<RawArgument>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse `name=type:value`. The value may itself contain `=` and `:`.
pub fn parse_raw_argument(raw: &str) -> Result<RawArgument, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TYPE:VALUE, got {raw:?}"))?;
    let (type_name, value) = rest
        .split_once(':')
        .ok_or_else(|| format!("missing type in {raw:?} (expected NAME=TYPE:VALUE)"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing argument name in {raw:?}"));
    }
    Ok(RawArgument::new(name, value, type_name.trim()))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
