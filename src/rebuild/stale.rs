// src/rebuild/stale.rs

//! Modification-time staleness check for the output binary.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use tracing::debug;

use crate::errors::{NobuildError, Result};

/// Result of comparing the binary against its watch set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    NeedsRebuild,
    UpToDate,
}

/// Compare the binary's last-modified time against every path in the watch
/// set.
///
/// - A missing binary means `NeedsRebuild` (first run).
/// - A missing watched path is skipped: declared watch files may be optional.
/// - Any other metadata failure, on the binary or a watched path, is an
///   error and aborts the check early.
/// - The check short-circuits on the first watched file found strictly newer
///   than the binary; only the maximum mtime matters.
pub fn check<P>(binary: &Path, watch_set: impl IntoIterator<Item = P>) -> Result<Staleness>
where
    P: AsRef<Path>,
{
    let binary_mtime = match mtime(binary) {
        Ok(Some(t)) => t,
        Ok(None) => {
            debug!(binary = ?binary, "binary does not exist, rebuild needed");
            return Ok(Staleness::NeedsRebuild);
        }
        Err(e) => return Err(e),
    };

    for path in watch_set {
        let path = path.as_ref();
        let watched_mtime = match mtime(path)? {
            Some(t) => t,
            None => {
                debug!(path = ?path, "watched file does not exist, skipping");
                continue;
            }
        };

        if watched_mtime > binary_mtime {
            debug!(path = ?path, "watched file is newer than binary");
            return Ok(Staleness::NeedsRebuild);
        }
    }

    Ok(Staleness::UpToDate)
}

/// Modification time of `path`, or `None` if the path does not exist.
fn mtime(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) => {
            let modified = meta.modified().map_err(|source| NobuildError::MetadataRead {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Some(modified))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(NobuildError::MetadataRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
