// src/exec/mod.rs

//! Child process execution: command assembly, spawning, waiting, and
//! process-image replacement.

pub mod command;
pub mod runner;

pub use command::Command;
pub use runner::{ProcessHandle, replace_current_process, spawn_async, spawn_sync, wait};
