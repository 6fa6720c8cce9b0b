// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fsops;
pub mod logging;
pub mod rebuild;

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::{CliArgs, CliCommand};
use crate::config::ConfigFile;
use crate::config::loader::load_and_validate;
use crate::errors::{NobuildError, Result};
use crate::exec::Command;
use crate::rebuild::{RebuildOptions, Toolchain};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the self-rebuild pass (before anything else — if the binary is stale
///   this re-execs and never returns)
/// - the `clean` subcommand or the default build steps
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    if let Some(section) = &cfg.rebuild {
        rebuild_self(section)?;
    }

    match args.command {
        Some(CliCommand::Clean) => run_clean(&cfg),
        None => run_steps(&cfg),
    }
}

/// One self-rebuild pass driven by the `[rebuild]` config section.
///
/// The live binary path is taken from argv[0], exactly what a stale rebuild
/// must overwrite and re-exec; the remaining arguments are forwarded verbatim
/// on relaunch. Does not return if a rebuild happened.
fn rebuild_self(section: &config::RebuildSection) -> Result<()> {
    let toolchain = Toolchain::resolve(section.compiler.as_deref())?;
    let options = RebuildOptions::from_config(section, toolchain);

    let mut argv = env::args_os();
    let binary = argv
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| NobuildError::Config("argv is empty".to_string()))?;
    let forwarded: Vec<OsString> = argv.collect();

    rebuild::go_rebuild_self(&binary, &forwarded, &options)
}

/// Run the configured `[[step]]` commands in order, stopping on the first
/// failure.
fn run_steps(cfg: &ConfigFile) -> Result<()> {
    fsops::create_directories(&cfg.create_dirs)?;

    for (idx, step) in cfg.step.iter().enumerate() {
        match &step.name {
            Some(name) => info!(step = %name, "running build step"),
            None => info!(step = idx + 1, "running build step"),
        }

        // Non-emptiness of cmd is checked at config validation.
        let command = Command::new(&step.cmd[0]).args(&step.cmd[1..]);
        exec::spawn_sync(&command)?;
    }

    debug!(steps = cfg.step.len(), "all build steps finished");
    Ok(())
}

/// Remove the files and directories declared in `[clean]`.
fn run_clean(cfg: &ConfigFile) -> Result<()> {
    fsops::remove_files(&cfg.clean.files)?;
    fsops::remove_directories(&cfg.clean.dirs)?;
    Ok(())
}

/// Simple dry-run output: print the rebuild settings, steps and clean
/// targets without executing anything.
fn print_dry_run(cfg: &ConfigFile) {
    println!("nobuild dry-run");

    match &cfg.rebuild {
        Some(rebuild) => {
            println!("  [rebuild]");
            println!("      source: {}", rebuild.source.display());
            if !rebuild.watch.is_empty() {
                println!("      watch: {:?}", rebuild.watch);
            }
            if !rebuild.extra_sources.is_empty() {
                println!("      extra_sources: {:?}", rebuild.extra_sources);
            }
            if !rebuild.extra_flags.is_empty() {
                println!("      extra_flags: {:?}", rebuild.extra_flags);
            }
            if let Some(compiler) = &rebuild.compiler {
                println!("      compiler: {compiler}");
            }
        }
        None => println!("  [rebuild]: none (self-rebuild disabled)"),
    }
    println!();

    if !cfg.create_dirs.is_empty() {
        println!("create_dirs: {:?}", cfg.create_dirs);
    }

    println!("steps ({}):", cfg.step.len());
    for (idx, step) in cfg.step.iter().enumerate() {
        match &step.name {
            Some(name) => println!("  - {name}"),
            None => println!("  - step {}", idx + 1),
        }
        println!("      cmd: {:?}", step.cmd);
    }

    if !cfg.clean.files.is_empty() || !cfg.clean.dirs.is_empty() {
        println!("clean:");
        println!("      files: {:?}", cfg.clean.files);
        println!("      dirs: {:?}", cfg.clean.dirs);
    }

    debug!("dry-run complete (no execution)");
}
