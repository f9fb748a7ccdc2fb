// src/errors.rs

//! Crate-wide error type.
//!
//! The mapping to failure classes:
//! - configuration problems (no resolvable shell instance, bad runner
//!   config) surface as [`ShellError::NoActiveInstance`] / [`ShellError::Config`]
//!   and are always fatal;
//! - a process that could not be spawned at all is [`ShellError::Spawn`]
//!   and never reaches the error-handler chain;
//! - a command that ran and exited nonzero is *not* an error: it is a
//!   `CommandResult` with `success() == false`, routed to the active policy;
//! - [`ShellError::CommandAborted`] is what `AbortOnFailure` raises from a
//!   failed result and is expected to unwind to the script boundary;
//! - [`ShellError::InvalidLogTarget`] is a logger construction failure.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no active shell instance; pass one explicitly or enter an activated scope")]
    NoActiveInstance,

    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{command}' failed with exit code {exit_code} (full command: '{full_command}')")]
    CommandAborted {
        command: String,
        exit_code: i32,
        full_command: String,
    },

    #[error("log target '{0}' already exists and is not a directory")]
    InvalidLogTarget(PathBuf),

    #[error("invalid scanner pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShellError>;
