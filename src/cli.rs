// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `nobuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nobuild",
    version,
    about = "Self-rebuilding build runner: recompiles itself when its sources change, then runs the configured build steps.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). The file is optional; a missing one
    /// behaves as an empty config.
    ///
    /// Default: `Nobuild.toml` in the current working directory.
    #[arg(
        long,
        value_name = "PATH",
        default_value_os_t = crate::config::loader::default_config_path()
    )]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NOBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the configured steps, but don't execute
    /// anything (including the self-rebuild).
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Remove the build outputs declared in `[clean]`.
    Clean,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
