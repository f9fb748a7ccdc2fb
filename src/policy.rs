// src/policy.rs

//! Error-handling policies.
//!
//! Exactly one policy is active per shell. It gates whether a command may
//! run (`should_run`) and reacts to a non-skipped command finishing with a
//! nonzero exit code (`handle`). Commands flagged `CLEANUP` bypass the gate
//! entirely (the engine never consults `should_run` for them), so teardown
//! keeps running even while an abort is unwinding.

use crate::command::{CommandMetadata, CommandResult};
use crate::errors::{Result, ShellError};

/// Policy controlling whether a command runs and how a failure is handled.
pub trait ErrorHandler: Send + Sync {
    /// Gate evaluated before a command executes; `false` short-circuits the
    /// invocation into a skipped result.
    fn should_run(&self, _metadata: &CommandMetadata) -> bool {
        true
    }

    /// Invoked only when a non-skipped command finishes with a nonzero exit
    /// code. Returning an error aborts the script.
    fn handle(&self, _result: &CommandResult) -> Result<()> {
        Ok(())
    }
}

/// Gate always open, failures ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ErrorHandler for AllowAll {}

/// Failures are tolerated; the script proceeds to the next command.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepGoing;

impl ErrorHandler for KeepGoing {}

/// A failed command aborts the script: `handle` raises a propagating
/// [`ShellError::CommandAborted`] carrying the failing command and its exit
/// code.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnFailure;

impl ErrorHandler for AbortOnFailure {
    fn handle(&self, result: &CommandResult) -> Result<()> {
        Err(ShellError::CommandAborted {
            command: result.command.clone(),
            exit_code: result.exit_code,
            full_command: result.full_command_string(),
        })
    }
}
