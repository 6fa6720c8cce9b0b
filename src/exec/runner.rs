// src/exec/runner.rs

//! Spawning and waiting on child processes.
//!
//! Every spawn (and every process-image replacement) logs the full command as
//! a single `CMD: ...` line before executing it, so the output of a build run
//! doubles as a transcript of everything it executed.

use std::convert::Infallible;
use std::process::{Child, Command as StdCommand};

use tracing::info;

use crate::errors::{NobuildError, Result};
use crate::exec::Command;

/// A spawned child process that has not been waited on yet.
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    /// Rendered command line, kept for diagnostics.
    command: String,
}

impl ProcessHandle {
    /// OS process id of the child.
    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

/// Spawn `command` as a child process and return immediately.
///
/// A target that cannot be started at all (not found, not executable)
/// surfaces here as [`NobuildError::Spawn`].
pub fn spawn_async(command: &Command) -> Result<ProcessHandle> {
    info!("CMD: {command}");

    let child = StdCommand::new(command.program())
        .args(command.tail())
        .spawn()
        .map_err(|source| NobuildError::Spawn {
            command: command.to_string(),
            source,
        })?;

    Ok(ProcessHandle {
        child,
        command: command.to_string(),
    })
}

/// Block until the child terminates and map its status.
///
/// Exit code 0 is the only success. A nonzero exit becomes
/// [`NobuildError::CommandFailed`]; termination by signal (no exit code at
/// all) becomes [`NobuildError::CommandKilled`]. The underlying wait syscall
/// is retried on transient interruption by `std`, so an `Err` from it is a
/// genuine wait failure.
pub fn wait(mut handle: ProcessHandle) -> Result<()> {
    let status = handle.child.wait().map_err(|source| NobuildError::Wait {
        command: handle.command.clone(),
        source,
    })?;

    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(NobuildError::CommandFailed {
            command: handle.command,
            code,
        }),
        None => Err(NobuildError::CommandKilled {
            command: handle.command,
        }),
    }
}

/// Spawn `command` and wait for it to finish.
pub fn spawn_sync(command: &Command) -> Result<()> {
    wait(spawn_async(command)?)
}

/// Replace the current process image with `command`.
///
/// On success this never returns, which is why the success type is
/// uninhabited. On failure the process is still running the old image and the
/// caller decides what to do with the [`NobuildError::Relaunch`] error.
///
/// On non-Unix platforms, where no exec primitive exists, the command is run
/// as a child and the current process exits with the child's status — still
/// never returning on success.
pub fn replace_current_process(command: &Command) -> Result<Infallible> {
    info!("CMD: {command}");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        let source = StdCommand::new(command.program())
            .args(command.tail())
            .exec();

        // exec only ever returns on failure.
        Err(NobuildError::Relaunch {
            command: command.to_string(),
            source,
        })
    }

    #[cfg(not(unix))]
    {
        let status = StdCommand::new(command.program())
            .args(command.tail())
            .status()
            .map_err(|source| NobuildError::Relaunch {
                command: command.to_string(),
                source,
            })?;

        std::process::exit(status.code().unwrap_or(1));
    }
}
