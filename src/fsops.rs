// src/fsops.rs

//! Thin filesystem helpers for build scripts.
//!
//! These are deliberately shallow wrappers over `std::fs`: their only added
//! value is a log line per operation and path context on errors, so a build
//! run reads as a transcript of what it touched.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::errors::{NobuildError, Result};

/// Create a directory. An already existing directory is not an error.
pub fn create_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!(path = ?path, "creating directory");

    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(fs_error(path, source)),
    }
}

/// Create several directories in order.
pub fn create_directories<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        create_directory(path)?;
    }
    Ok(())
}

/// Remove a file. A missing file is an error.
pub fn remove_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!(path = ?path, "removing file");

    fs::remove_file(path).map_err(|source| fs_error(path, source))
}

/// Remove several files in order.
pub fn remove_files<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        remove_file(path)?;
    }
    Ok(())
}

/// Remove an empty directory.
pub fn remove_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!(path = ?path, "removing directory");

    fs::remove_dir(path).map_err(|source| fs_error(path, source))
}

/// Remove a directory and everything under it.
pub fn remove_directory_recursive(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!(path = ?path, "removing directory recursively");

    fs::remove_dir_all(path).map_err(|source| fs_error(path, source))
}

/// Remove several directories recursively, in order.
pub fn remove_directories<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        remove_directory_recursive(path)?;
    }
    Ok(())
}

/// Whether a path exists at all (file or directory).
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

fn fs_error(path: &Path, source: io::Error) -> NobuildError {
    NobuildError::Fs {
        path: path.to_path_buf(),
        source,
    }
}
