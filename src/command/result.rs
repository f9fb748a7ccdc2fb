// src/command/result.rs

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Immutable record of a single executed-or-skipped command invocation.
///
/// Exactly one result exists per invocation. A skipped result always has
/// `exit_code == 0`, an empty `output` and `skipped == true`; a non-skipped
/// result always reflects a real backend invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command name that was (or would have been) run.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
    /// Resolved absolute working directory for the invocation.
    pub cwd: PathBuf,
    /// Captured combined output text (stdout and stderr).
    pub output: String,
    /// Signed exit code; 0 for skipped commands.
    pub exit_code: i32,
    /// True if the command never reached a backend.
    pub skipped: bool,
    /// When the command was dispatched to the backend.
    pub start_time: DateTime<Utc>,
    /// When the command finished (all streams drained, process exited).
    pub end_time: DateTime<Utc>,
    /// Identifier of the backend that handled the invocation.
    pub backend: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        !self.skipped && self.exit_code == 0
    }

    /// The full command line: command name followed by all arguments.
    pub fn full_command(&self) -> Vec<String> {
        let mut full = Vec::with_capacity(1 + self.args.len());
        full.push(self.command.clone());
        full.extend(self.args.iter().cloned());
        full
    }

    pub fn full_command_string(&self) -> String {
        self.full_command().join(" ")
    }

    /// Synthesize the result for a command that was skipped (inactive, or
    /// denied by the error-handler gate).
    pub(crate) fn skipped(
        command: impl Into<String>,
        args: &[String],
        cwd: &Path,
        backend: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            command: command.into(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            output: String::new(),
            exit_code: 0,
            skipped: true,
            start_time: now,
            end_time: now,
            backend: backend.to_string(),
        }
    }
}
