// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from `Nobuild.toml`.
///
/// ```toml
/// [rebuild]
/// source = "nobuild.rs"
/// watch = ["build-helpers.rs"]
/// extra_flags = ["-O"]
///
/// create_dirs = ["build"]
///
/// [[step]]
/// name = "compile"
/// cmd = ["g++", "-Wall", "-o", "build/main", "example/main.cpp"]
///
/// [[step]]
/// cmd = ["./build/main"]
///
/// [clean]
/// files = ["build/main"]
/// dirs = ["build"]
/// ```
///
/// All sections are optional; an empty file is a valid (no-op) config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Self-rebuild settings from `[rebuild]`. Absent means the binary never
    /// rebuilds itself.
    #[serde(default)]
    pub rebuild: Option<RebuildSection>,

    /// Directories created before the first step runs.
    #[serde(default)]
    pub create_dirs: Vec<PathBuf>,

    /// Ordered project build steps from `[[step]]`.
    #[serde(default)]
    pub step: Vec<StepConfig>,

    /// Targets of the `clean` subcommand from `[clean]`.
    #[serde(default)]
    pub clean: CleanSection,
}

/// `[rebuild]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RebuildSection {
    /// The build script's own source file.
    pub source: PathBuf,

    /// Extra watched files. Missing files are tolerated, so a watch entry
    /// may name an optional file.
    #[serde(default)]
    pub watch: Vec<PathBuf>,

    /// Extra source files, both watched and passed to the compiler.
    #[serde(default)]
    pub extra_sources: Vec<PathBuf>,

    /// Extra compiler flags, appended after the fixed command template.
    #[serde(default)]
    pub extra_flags: Vec<String>,

    /// Compiler override (`rustc`, `g++`, `clang++`, or a full path to one
    /// of them). `NOBUILD_COMPILER` in the environment takes precedence.
    #[serde(default)]
    pub compiler: Option<String>,
}

/// A single `[[step]]` entry: one command, run to completion before the next
/// step starts.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// The command as an argument vector; the first element is the
    /// executable. Must be non-empty.
    pub cmd: Vec<String>,

    /// Optional display name used in log lines.
    #[serde(default)]
    pub name: Option<String>,
}

/// `[clean]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanSection {
    /// Files removed by `nobuild clean`.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Directories removed (recursively) by `nobuild clean`, after `files`.
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
}
