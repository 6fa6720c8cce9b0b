// src/exec/command.rs

//! Ordered argument-list builder for child process commands.
//!
//! A [`Command`] is a non-empty sequence of strings: the first element is the
//! executable name or path, the rest are its arguments. Non-emptiness is
//! enforced by construction — `Command::new` takes the program and the
//! builder methods only ever append.

use std::ffi::{OsStr, OsString};
use std::fmt;

/// An ordered, append-only command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    argv: Vec<OsString>,
}

impl Command {
    /// Start a command line with the executable name or path.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            argv: vec![program.into()],
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append a sequence of arguments, preserving their order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// The executable name or path (the first element).
    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    /// The arguments after the program, in order.
    pub fn tail(&self) -> &[OsString] {
        &self.argv[1..]
    }

    /// The full argument vector, program included.
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }
}

/// Human-readable single-line rendering, used for the `CMD:` log records.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
