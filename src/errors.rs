// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NobuildError {
    #[error("Failed to read metadata for {path:?}: {source}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for command `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Command `{command}` was terminated abnormally")]
    CommandKilled { command: String },

    #[error("Rebuild compile step failed: {0}")]
    CompileFailed(#[source] Box<NobuildError>),

    /// Compile failed *and* the previous binary could not be moved back into
    /// place. The backup still exists at `backup` but the primary path is
    /// empty, so the next invocation needs manual intervention.
    #[error("Compile failed and the previous binary could not be restored from {backup:?}: {source}")]
    RestoreFailed {
        backup: PathBuf,
        #[source]
        source: Box<NobuildError>,
    },

    #[error("Failed to replace process image with `{command}`: {source}")]
    Relaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem operation failed on {path:?}: {source}")]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NobuildError>;
