// src/loggers/null.rs

use crate::command::CommandResult;
use crate::errors::Result;
use crate::loggers::CommandLogger;
use crate::scan::ScanEntry;

/// Contract-compatible sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl CommandLogger for NullLogger {
    fn log(&mut self, _stdout_chunk: &str, _stderr_chunk: Option<&str>) {}

    fn log_results(&mut self, _result: &CommandResult, _entries: &[ScanEntry]) -> Result<()> {
        Ok(())
    }
}
