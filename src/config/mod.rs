// src/config/mod.rs

//! `Nobuild.toml` configuration: the build script's watch list, extra
//! compiler flags, project build steps and clean targets.

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CleanSection, ConfigFile, RebuildSection, StepConfig};
