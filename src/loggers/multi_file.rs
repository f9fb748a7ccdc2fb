// src/loggers/multi_file.rs

//! Logger that persists each command's output to its own file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::{CommandMetadata, CommandResult};
use crate::errors::{Result, ShellError};
use crate::loggers::{CommandLogger, format};
use crate::scan::ScanEntry;

/// Construction options for [`MultiFileLogger`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFileOptions {
    /// Remove any prior contents of the output directory at construction.
    pub clean: bool,
    /// Embed a header block (command + cwd) at the top of each file.
    pub command_header: bool,
    /// Embed a footer block (exit code) at the bottom of each file.
    pub command_footer: bool,
}

/// Writes one UTF-8 log file per command at
/// `<sequence>-<basename(command)>.log` inside an output directory it owns
/// as sole writer.
///
/// The sequence counter is instance-scoped and monotonic: it advances for
/// every completed-or-skipped command, regardless of success, and is never
/// reused.
#[derive(Debug)]
pub struct MultiFileLogger {
    output_dir: PathBuf,
    options: MultiFileOptions,
    sequence: u64,
    // Chunks accumulated for the in-flight command.
    buffer: String,
}

impl MultiFileLogger {
    /// Create a logger with default options, creating the directory if
    /// needed. Fails with [`ShellError::InvalidLogTarget`] when the path
    /// exists as a non-directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(output_dir, MultiFileOptions::default())
    }

    pub fn with_options(
        output_dir: impl Into<PathBuf>,
        options: MultiFileOptions,
    ) -> Result<Self> {
        let output_dir = output_dir.into();

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ShellError::InvalidLogTarget(output_dir));
        }
        fs::create_dir_all(&output_dir)?;

        if options.clean {
            clean_dir(&output_dir)?;
        }

        Ok(Self {
            output_dir,
            options,
            sequence: 0,
            buffer: String::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Sequence number of the most recently written file (0 before any).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn log_file_name(&self, command: &str) -> String {
        let basename = Path::new(command)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| command.to_string());
        format!("{}-{}.log", self.sequence, basename)
    }
}

impl CommandLogger for MultiFileLogger {
    fn begin(&mut self, _metadata: &CommandMetadata, _cwd: &Path) -> Result<()> {
        self.buffer.clear();
        Ok(())
    }

    fn log(&mut self, stdout_chunk: &str, stderr_chunk: Option<&str>) {
        self.buffer.push_str(stdout_chunk);
        if let Some(chunk) = stderr_chunk {
            self.buffer.push_str(chunk);
        }
    }

    fn log_results(&mut self, result: &CommandResult, _entries: &[ScanEntry]) -> Result<()> {
        // Advances for skipped and failed commands too; numbers are never
        // reused within this logger's lifetime.
        self.sequence += 1;

        let mut contents = String::new();
        if self.options.command_header {
            let metadata = CommandMetadata::new(
                result.command.clone(),
                result.args.iter().cloned(),
                crate::command::CommandFlags::STANDARD,
            );
            contents.push_str(&format::command_header(&metadata, &result.cwd));
        }

        // Prefer the chunks this logger observed; fall back to the
        // canonical output (identical text, covers skipped commands).
        let body = if self.buffer.is_empty() {
            result.output.as_str()
        } else {
            self.buffer.as_str()
        };
        contents.push_str(body);
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }

        if self.options.command_footer {
            contents.push_str(&format::command_footer(result));
        }

        let path = self.output_dir.join(self.log_file_name(&result.command));
        debug!(path = %path.display(), "writing command log file");
        fs::write(&path, contents)?;

        self.buffer.clear();
        Ok(())
    }
}

fn clean_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
