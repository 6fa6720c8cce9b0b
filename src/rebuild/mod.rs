// src/rebuild/mod.rs

//! The self-rebuild protocol: backup → compile → restore-or-swap → re-exec.
//!
//! The running binary may be the very file the compiler is about to
//! overwrite, and overwriting an executing binary in place is unsafe. So the
//! protocol always renames the live binary aside first, and renames it back
//! verbatim if the new build cannot be produced. The binary path is never
//! held open by the rebuilder itself; exclusive control over it comes purely
//! from the rename sequence, not from any lock.

pub mod stale;
pub mod toolchain;

pub use stale::{Staleness, check};
pub use toolchain::{Toolchain, ToolchainKind};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::RebuildSection;
use crate::errors::{NobuildError, Result};
use crate::exec::{Command, runner};

/// Suffix appended to the binary path to derive the backup path.
pub const BACKUP_SUFFIX: &str = ".old";

/// Everything the rebuild protocol needs to know about one build script.
#[derive(Debug, Clone)]
pub struct RebuildOptions {
    /// The build script's own source file. Always watched and always the
    /// first input to the compiler.
    pub source_file: PathBuf,
    /// Additional watched files that do not participate in compilation.
    pub watch: Vec<PathBuf>,
    /// Additional source files, both watched and compiled.
    pub extra_sources: Vec<PathBuf>,
    /// Extra compiler flags appended after the fixed template.
    pub extra_flags: Vec<String>,
    pub toolchain: Toolchain,
}

impl RebuildOptions {
    pub fn new(source_file: impl Into<PathBuf>, toolchain: Toolchain) -> Self {
        Self {
            source_file: source_file.into(),
            watch: Vec::new(),
            extra_sources: Vec::new(),
            extra_flags: Vec::new(),
            toolchain,
        }
    }

    pub fn from_config(section: &RebuildSection, toolchain: Toolchain) -> Self {
        Self {
            source_file: section.source.clone(),
            watch: section.watch.clone(),
            extra_sources: section.extra_sources.clone(),
            extra_flags: section.extra_flags.clone(),
            toolchain,
        }
    }

    pub fn watch_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.watch.push(path.into());
        self
    }

    pub fn extra_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_sources.push(path.into());
        self
    }

    pub fn extra_flag(mut self, flag: impl Into<String>) -> Self {
        self.extra_flags.push(flag.into());
        self
    }

    /// All paths whose mtimes decide staleness. Order is irrelevant and
    /// duplicates are harmless.
    pub fn watch_set(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.source_file.as_path())
            .chain(self.watch.iter().map(PathBuf::as_path))
            .chain(self.extra_sources.iter().map(PathBuf::as_path))
    }

    /// The fixed-shape compiler invocation writing to `binary`.
    pub fn compile_command(&self, binary: &Path) -> Command {
        Command::new(&self.toolchain.compiler_path)
            .args(&self.toolchain.warning_flags)
            .arg(&self.toolchain.standard_flag)
            .arg("-o")
            .arg(binary)
            .arg(&self.source_file)
            .args(&self.extra_flags)
            .args(&self.extra_sources)
    }
}

/// Backup path for a binary: the same path with `.old` appended.
pub fn backup_path(binary: &Path) -> PathBuf {
    let mut path = binary.as_os_str().to_os_string();
    path.push(BACKUP_SUFFIX);
    PathBuf::from(path)
}

/// The command used to re-exec the rebuilt binary: the binary path followed
/// by the original arguments (argv[0] excluded), verbatim and in order.
pub fn relaunch_command(binary: &Path, forwarded_args: &[OsString]) -> Command {
    Command::new(binary).args(forwarded_args.iter().cloned())
}

/// Run the check/backup/compile/restore/cleanup part of the protocol, without
/// relaunching.
///
/// Returns `UpToDate` when nothing had to be done, or `NeedsRebuild` after a
/// successful rebuild (the binary at `binary_path` is then the fresh one and
/// the backup has been cleaned up best-effort).
///
/// On a compile failure the previous binary is renamed back into place and
/// [`NobuildError::CompileFailed`] is returned; if that restore rename fails
/// too, [`NobuildError::RestoreFailed`] is returned instead and the backup is
/// left on disk.
pub fn rebuild_once(binary_path: &Path, options: &RebuildOptions) -> Result<Staleness> {
    match stale::check(binary_path, options.watch_set())? {
        Staleness::UpToDate => return Ok(Staleness::UpToDate),
        Staleness::NeedsRebuild => {}
    }

    info!(binary = ?binary_path, "watched sources changed, rebuilding");

    // On the first run there is no binary to move aside.
    let backup = backup_path(binary_path);
    let had_backup = binary_path.exists();
    if had_backup {
        rename(binary_path, &backup)?;
    }

    let compile = options.compile_command(binary_path);
    if let Err(compile_err) = runner::spawn_sync(&compile) {
        if !had_backup {
            return Err(NobuildError::CompileFailed(Box::new(compile_err)));
        }
        return match rename(&backup, binary_path) {
            Ok(()) => Err(NobuildError::CompileFailed(Box::new(compile_err))),
            Err(restore_err) => Err(NobuildError::RestoreFailed {
                backup,
                source: Box::new(restore_err),
            }),
        };
    }

    if had_backup {
        // A stray backup is a minor leak, not a correctness violation.
        info!(backup = ?backup, "removing backup binary");
        if let Err(err) = fs::remove_file(&backup) {
            warn!(backup = ?backup, error = %err, "failed to remove backup binary");
        }
    }

    Ok(Staleness::NeedsRebuild)
}

/// Full self-rebuild pass: [`rebuild_once`] followed, when a rebuild
/// happened, by replacing the process image with the rebuilt binary.
///
/// Returns `Ok(())` only on the up-to-date path. After a successful rebuild
/// this never returns — the process is the new binary, with the original
/// arguments forwarded. A relaunch failure is returned as an error; the
/// rebuilt binary stays on disk for the next manual invocation.
pub fn go_rebuild_self(
    binary_path: &Path,
    forwarded_args: &[OsString],
    options: &RebuildOptions,
) -> Result<()> {
    match rebuild_once(binary_path, options)? {
        Staleness::UpToDate => Ok(()),
        Staleness::NeedsRebuild => {
            let relaunch = relaunch_command(binary_path, forwarded_args);
            match runner::replace_current_process(&relaunch) {
                Ok(never) => match never {},
                Err(err) => Err(err),
            }
        }
    }
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    info!(from = ?from, to = ?to, "renaming binary");
    fs::rename(from, to).map_err(|source| NobuildError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
