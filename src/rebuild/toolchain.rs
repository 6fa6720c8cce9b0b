// src/rebuild/toolchain.rs

//! Compiler toolchain selection.
//!
//! The toolchain is an explicit configuration value resolved once at startup,
//! in this precedence order:
//!
//! 1. `NOBUILD_COMPILER` environment variable
//! 2. `compiler` in the `[rebuild]` config section
//! 3. the default (`rustc`)
//!
//! The override may be a bare name (`rustc`, `g++`, `clang++`) or a full path
//! to one of them, in which case the given path is used as the compiler
//! executable.

use std::env;
use std::path::Path;

use crate::errors::{NobuildError, Result};

/// Environment variable overriding the compiler selection.
pub const COMPILER_ENV_VAR: &str = "NOBUILD_COMPILER";

/// The enumerated set of supported compilers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainKind {
    Rustc,
    Gxx,
    Clangxx,
}

impl ToolchainKind {
    /// Map a compiler name to its kind. Accepts the executable names used on
    /// the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rustc" => Some(Self::Rustc),
            "g++" => Some(Self::Gxx),
            "clang++" => Some(Self::Clangxx),
            _ => None,
        }
    }
}

/// A fully resolved compiler configuration.
///
/// `compile_command` in the rebuild module assembles the fixed-shape
/// invocation `{compiler, warning_flags.., standard_flag, -o, output, source,
/// extra_flags.., extra_sources..}` from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler_path: String,
    pub standard_flag: String,
    pub warning_flags: Vec<String>,
}

impl Toolchain {
    /// The default flag set for a supported compiler.
    pub fn from_kind(kind: ToolchainKind) -> Self {
        match kind {
            ToolchainKind::Rustc => Self {
                compiler_path: "rustc".to_string(),
                standard_flag: "--edition=2021".to_string(),
                // rustc warns by default.
                warning_flags: vec![],
            },
            ToolchainKind::Gxx => Self {
                compiler_path: "g++".to_string(),
                standard_flag: "-std=c++20".to_string(),
                warning_flags: vec!["-Wall".to_string(), "-Wpedantic".to_string()],
            },
            ToolchainKind::Clangxx => Self {
                compiler_path: "clang++".to_string(),
                standard_flag: "-std=c++20".to_string(),
                warning_flags: vec!["-Wall".to_string(), "-Wpedantic".to_string()],
            },
        }
    }

    /// Resolve the toolchain from the environment and an optional config
    /// override. Called once at startup.
    pub fn resolve(config_override: Option<&str>) -> Result<Self> {
        let env_override = env::var(COMPILER_ENV_VAR).ok();
        Self::resolve_from(env_override.as_deref(), config_override)
    }

    /// Pure resolution logic, separated from the environment read so it can
    /// be exercised directly.
    pub fn resolve_from(
        env_override: Option<&str>,
        config_override: Option<&str>,
    ) -> Result<Self> {
        let Some(requested) = env_override.or(config_override) else {
            return Ok(Self::from_kind(ToolchainKind::Rustc));
        };

        // A full path selects by its file name but keeps the path.
        let name = Path::new(requested)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| requested.to_string());

        let kind = ToolchainKind::from_name(&name).ok_or_else(|| {
            NobuildError::Config(format!(
                "unsupported compiler '{requested}' (supported: rustc, g++, clang++)"
            ))
        })?;

        let mut toolchain = Self::from_kind(kind);
        toolchain.compiler_path = requested.to_string();
        Ok(toolchain)
    }
}
