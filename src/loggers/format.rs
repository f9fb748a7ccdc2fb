// src/loggers/format.rs

//! Shared header/footer text used by the console and multi-file loggers.

use std::path::Path;

use crate::command::{CommandMetadata, CommandResult};

/// Header block: the full command line and its working directory.
pub fn command_header(metadata: &CommandMetadata, cwd: &Path) -> String {
    format!(
        "$ {}\n  cwd: {}\n",
        metadata.full_command_string(),
        cwd.display()
    )
}

/// Footer block: the exit code, with a marker for skipped commands.
pub fn command_footer(result: &CommandResult) -> String {
    if result.skipped {
        format!("[{}] skipped (exit code: {})\n", result.command, result.exit_code)
    } else {
        format!("[{}] exit code: {}\n", result.command, result.exit_code)
    }
}
