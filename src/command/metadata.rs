// src/command/metadata.rs

use std::fmt;
use std::panic::Location;

use crate::command::CommandFlags;

/// Immutable description of a command: name, ordered arguments, flags.
///
/// `full_command` is a derived view and always equals `[name] + args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    name: String,
    args: Vec<String>,
    flags: CommandFlags,
}

impl CommandMetadata {
    pub fn new(
        name: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        flags: CommandFlags,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            flags,
        }
    }

    /// The executable/command name, without any arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn flags(&self) -> CommandFlags {
        self.flags
    }

    /// The full command line: command name followed by all arguments.
    pub fn full_command(&self) -> Vec<String> {
        let mut full = Vec::with_capacity(1 + self.args.len());
        full.push(self.name.clone());
        full.extend(self.args.iter().cloned());
        full
    }

    /// Display form of [`full_command`](Self::full_command), space-joined.
    pub fn full_command_string(&self) -> String {
        self.full_command().join(" ")
    }
}

/// Source location captured when a [`Command`](crate::Command) is built.
///
/// Diagnostics only; never consulted during execution. Thanks to
/// `#[track_caller]` on the capture path this points at the script that
/// constructed the command, not at harness internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    file: &'static str,
    line: u32,
}

impl CallerInfo {
    #[track_caller]
    pub fn capture() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
