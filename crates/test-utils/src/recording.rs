use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shellrig::{
    CommandLogger, CommandMetadata, CommandResult, ErrorHandler, Result, ScanEntry, StreamConfig,
};

/// Everything a logger observes, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Begin {
        command: String,
        cwd: PathBuf,
    },
    Chunk {
        stdout: String,
        stderr: Option<String>,
    },
    Results {
        command: String,
        exit_code: i32,
        skipped: bool,
        entries: usize,
    },
}

/// Logger that records its callbacks for assertions.
pub struct RecordingLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    stream_config: StreamConfig,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::with_stream_config(StreamConfig::MergeStreams)
    }

    pub fn with_stream_config(stream_config: StreamConfig) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stream_config,
        }
    }

    /// Handle onto the recorded events, for assertions after the logger
    /// has been moved into a shell.
    pub fn events(&self) -> Arc<Mutex<Vec<LogEvent>>> {
        Arc::clone(&self.events)
    }
}

impl Default for RecordingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLogger for RecordingLogger {
    fn stream_config(&self) -> StreamConfig {
        self.stream_config
    }

    fn begin(&mut self, metadata: &CommandMetadata, cwd: &Path) -> Result<()> {
        self.events.lock().unwrap().push(LogEvent::Begin {
            command: metadata.name().to_string(),
            cwd: cwd.to_path_buf(),
        });
        Ok(())
    }

    fn log(&mut self, stdout_chunk: &str, stderr_chunk: Option<&str>) {
        self.events.lock().unwrap().push(LogEvent::Chunk {
            stdout: stdout_chunk.to_string(),
            stderr: stderr_chunk.map(str::to_string),
        });
    }

    fn log_results(&mut self, result: &CommandResult, entries: &[ScanEntry]) -> Result<()> {
        self.events.lock().unwrap().push(LogEvent::Results {
            command: result.command.clone(),
            exit_code: result.exit_code,
            skipped: result.skipped,
            entries: entries.len(),
        });
        Ok(())
    }
}

/// Policy whose gate denies every command (cleanup flags still bypass it).
/// Failures are tolerated so scripts keep going.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl ErrorHandler for DenyAll {
    fn should_run(&self, _metadata: &CommandMetadata) -> bool {
        false
    }
}
