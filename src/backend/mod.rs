// src/backend/mod.rs

//! Pluggable execution backends.
//!
//! A backend is solely responsible for spawning a process-equivalent and
//! exposing its output streams and exit status; it never interprets command
//! flags. The engine talks to backends through the [`Backend`] trait so
//! tests (and alternate execution environments) can substitute their own
//! implementation without touching the per-command protocol.
//!
//! - [`native`] spawns real processes via `tokio::process`.
//! - [`dry_run`] is a contract-compatible stub that only displays the
//!   command line.

pub mod dry_run;
pub mod native;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::command::CommandMetadata;
use crate::errors::Result;

pub use dry_run::DryRunBackend;
pub use native::NativeBackend;

/// How a command's stdout/stderr should be exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamConfig {
    /// One interleaved stream; the handle's `stderr` is `None`.
    #[default]
    MergeStreams,
    /// Two independent streams drained concurrently.
    SeparateStreams,
}

/// Channel of verbatim output chunks for a single stream.
///
/// Chunks are produced in stream order; the channel closes at end-of-stream.
pub type ChunkReceiver = mpsc::Receiver<String>;

/// Future resolving to the process exit code once it terminates.
pub type WaitHandle = Pin<Box<dyn Future<Output = Result<i32>> + Send>>;

/// Handle to an in-flight backend invocation.
pub struct ExecHandle {
    /// Output chunks; under [`StreamConfig::MergeStreams`] this carries
    /// both streams in production order.
    pub stdout: ChunkReceiver,
    /// Present only under [`StreamConfig::SeparateStreams`].
    pub stderr: Option<ChunkReceiver>,
    /// Resolves to the exit code after the process terminates.
    pub wait: WaitHandle,
}

/// Strategy that executes a command and exposes its streams and exit status.
///
/// `cwd` is always absolute by the time a backend sees it. Implementations
/// return a manually boxed future so the trait stays object-safe.
pub trait Backend: Send + Sync {
    /// Stable identifier recorded on every result this backend produces.
    fn id(&self) -> &'static str;

    fn run<'a>(
        &'a self,
        metadata: &'a CommandMetadata,
        cwd: &'a Path,
        streams: StreamConfig,
    ) -> Pin<Box<dyn Future<Output = Result<ExecHandle>> + Send + 'a>>;
}
