// src/backend/dry_run.rs

//! Backend that displays commands without executing them.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::{Backend, ExecHandle, StreamConfig};
use crate::command::CommandMetadata;
use crate::errors::Result;

type Sink = Box<dyn FnMut(&str) + Send>;

/// Contract-compatible stub backend: performs no execution, synthesizes a
/// zero exit code, and routes the rendered command line through a sink so
/// it can be displayed (by default, standard output).
///
/// Loggers still observe the invocation: the handle produces no chunks, so
/// the captured output is empty, and the engine calls `log_results` with
/// the synthesized result as it would for a real run.
pub struct DryRunBackend {
    sink: Mutex<Sink>,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::with_sink(|line: &str| println!("{line}"))
    }

    /// Use a custom sink for the rendered command lines.
    pub fn with_sink(sink: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }
}

impl Default for DryRunBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for DryRunBackend {
    fn id(&self) -> &'static str {
        "dry-run"
    }

    fn run<'a>(
        &'a self,
        metadata: &'a CommandMetadata,
        cwd: &'a Path,
        _streams: StreamConfig,
    ) -> Pin<Box<dyn Future<Output = Result<ExecHandle>> + Send + 'a>> {
        Box::pin(async move {
            let line = metadata.full_command_string();
            debug!(command = %line, cwd = %cwd.display(), "dry-run dispatch");

            {
                let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
                (sink)(&line);
            }

            // Closed channel: the drain loop sees immediate end-of-stream.
            let (_tx, rx) = mpsc::channel::<String>(1);

            Ok(ExecHandle {
                stdout: rx,
                stderr: None,
                wait: Box::pin(async { Ok(0) }),
            })
        })
    }
}
