// src/config/loader.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{NobuildError, Result};

/// Load a configuration file from a given path.
///
/// The config file is optional: a missing file yields the default (empty)
/// config — self-rebuild disabled, no steps, nothing to clean. Any other
/// read failure is an error.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = ?path, "config file not found, using defaults");
            return Ok(ConfigFile::default());
        }
        Err(err) => return Err(err.into()),
    };

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that every step has a non-empty command vector and that the
///   `[rebuild]` source path is non-empty.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate(&config)?;
    Ok(config)
}

/// Default config path: `Nobuild.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Nobuild.toml")
}

fn validate(config: &ConfigFile) -> Result<()> {
    for (idx, step) in config.step.iter().enumerate() {
        if step.cmd.is_empty() {
            let name = step.name.as_deref().unwrap_or("unnamed");
            return Err(NobuildError::Config(format!(
                "step {} ('{}') has an empty cmd",
                idx + 1,
                name
            )));
        }
    }

    if let Some(rebuild) = &config.rebuild
        && rebuild.source.as_os_str().is_empty()
    {
        return Err(NobuildError::Config(
            "[rebuild] source must not be empty".to_string(),
        ));
    }

    Ok(())
}
