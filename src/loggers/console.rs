// src/loggers/console.rs

//! Logger that echoes command output to the console.

use std::path::Path;

use crate::backend::StreamConfig;
use crate::command::{CommandFlags, CommandMetadata, CommandResult};
use crate::errors::Result;
use crate::loggers::{CommandLogger, format};
use crate::scan::ScanEntry;

type PrintFn = Box<dyn FnMut(&str) + Send>;

/// Echoes streamed chunks as they arrive, with an optional header before
/// streaming and an optional footer after completion.
///
/// Two independent per-command suppressions, driven by command flags:
/// `QUIET` silences the chunk echo only; `NO_CONSOLE` silences everything.
/// Neither affects capture; the engine still records the full output.
///
/// The print sink never receives an appended newline; chunks are forwarded
/// verbatim.
pub struct ConsoleLogger {
    print: PrintFn,
    print_header: bool,
    print_footer: bool,
    // Per-command state, reset in `begin`.
    quiet: bool,
    no_console: bool,
    output: String,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::with_print(|s: &str| print!("{s}"))
    }

    /// Use a custom print sink instead of standard output.
    pub fn with_print(print: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            print: Box::new(print),
            print_header: false,
            print_footer: false,
            quiet: false,
            no_console: false,
            output: String::new(),
        }
    }

    pub fn with_header(mut self, enabled: bool) -> Self {
        self.print_header = enabled;
        self
    }

    pub fn with_footer(mut self, enabled: bool) -> Self {
        self.print_footer = enabled;
        self
    }

    /// Combined output accumulated for the current command.
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLogger for ConsoleLogger {
    fn stream_config(&self) -> StreamConfig {
        StreamConfig::MergeStreams
    }

    fn begin(&mut self, metadata: &CommandMetadata, cwd: &Path) -> Result<()> {
        self.quiet = metadata.flags().contains(CommandFlags::QUIET);
        self.no_console = metadata.flags().contains(CommandFlags::NO_CONSOLE);
        self.output.clear();

        if self.print_header && !self.no_console {
            let header = format::command_header(metadata, cwd);
            (self.print)(&header);
        }
        Ok(())
    }

    fn log(&mut self, stdout_chunk: &str, stderr_chunk: Option<&str>) {
        self.output.push_str(stdout_chunk);
        if let Some(chunk) = stderr_chunk {
            self.output.push_str(chunk);
        }

        if self.no_console || self.quiet {
            return;
        }

        if !stdout_chunk.is_empty() {
            (self.print)(stdout_chunk);
        }
        if let Some(chunk) = stderr_chunk {
            (self.print)(chunk);
        }
    }

    fn log_results(&mut self, result: &CommandResult, _entries: &[ScanEntry]) -> Result<()> {
        if self.print_footer && !self.no_console {
            let footer = format::command_footer(result);
            (self.print)(&footer);
        }
        Ok(())
    }
}
