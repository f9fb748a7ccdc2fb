// src/loggers/mod.rs

//! Logger pipeline.
//!
//! Loggers observe a command's streamed output and its final result. Zero
//! or more are registered on a shell; the engine fans every chunk out to
//! all of them and calls `log_results` exactly once per command, in
//! registration order, after all chunks have been delivered. That call is
//! guaranteed even for failed and skipped commands, so loggers can release
//! resources.

pub mod console;
pub mod format;
pub mod multi_file;
pub mod null;

use std::path::Path;

use crate::backend::StreamConfig;
use crate::command::{CommandMetadata, CommandResult};
use crate::errors::Result;
use crate::scan::ScanEntry;

pub use console::ConsoleLogger;
pub use multi_file::{MultiFileLogger, MultiFileOptions};
pub use null::NullLogger;

/// Observer of a single shell's command invocations.
///
/// Lifecycle per command: `begin` once (including for skipped commands),
/// `log` zero or more times with verbatim chunks, `log_results` exactly
/// once.
pub trait CommandLogger: Send {
    /// Stream configuration this logger requires. If registered loggers
    /// disagree, separation wins for the invocation.
    fn stream_config(&self) -> StreamConfig {
        StreamConfig::MergeStreams
    }

    /// Per-command setup hook, called before any chunk is produced.
    fn begin(&mut self, _metadata: &CommandMetadata, _cwd: &Path) -> Result<()> {
        Ok(())
    }

    /// A verbatim output chunk. Under merged streams every chunk arrives in
    /// the first position; under separate streams stderr chunks arrive in
    /// the second position (with an empty first).
    fn log(&mut self, stdout_chunk: &str, stderr_chunk: Option<&str>);

    /// Completion hook: the final result plus the scanner's entries.
    fn log_results(&mut self, result: &CommandResult, entries: &[ScanEntry]) -> Result<()>;
}
