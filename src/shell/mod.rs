// src/shell/mod.rs

//! The orchestrator.
//!
//! A [`Shell`] owns the wiring for command invocations: the active backend,
//! the registered logger set, the error-handling policy and the working
//! directory. The per-command protocol lives in [`engine`]; the
//! active-instance stack used for implicit resolution lives in [`context`].

pub mod context;
mod engine;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::backend::{Backend, NativeBackend};
use crate::command::{Command, CommandResult};
use crate::errors::Result;
use crate::loggers::CommandLogger;
use crate::policy::{AbortOnFailure, ErrorHandler};

pub use context::ShellScope;

/// Orchestrator for command execution.
///
/// Construct with [`Shell::builder`]. Commands run one at a time; a single
/// command's streams are drained concurrently but the engine completes one
/// invocation's full protocol before starting the next.
pub struct Shell {
    backend: Box<dyn Backend>,
    loggers: Mutex<Vec<Box<dyn CommandLogger>>>,
    error_handler: Box<dyn ErrorHandler>,
    cwd: PathBuf,
}

impl Shell {
    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    /// Run a command through this shell's full per-command protocol.
    pub async fn run(&self, cmd: &Command) -> Result<CommandResult> {
        engine::run_command(self, cmd).await
    }

    /// Push this instance onto the process-wide active stack; it stays the
    /// innermost active shell until the returned scope guard drops.
    pub fn activate(self: &Arc<Self>) -> ShellScope {
        ShellScope::new(Arc::clone(self))
    }

    /// The innermost active shell instance, if any.
    pub fn active() -> Option<Arc<Shell>> {
        context::active()
    }

    /// Absolute working directory commands resolve against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub(crate) fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub(crate) fn error_handler(&self) -> &dyn ErrorHandler {
        self.error_handler.as_ref()
    }

    pub(crate) fn loggers(&self) -> &Mutex<Vec<Box<dyn CommandLogger>>> {
        &self.loggers
    }
}

/// Builder for [`Shell`].
///
/// Defaults: native backend, abort-on-failure policy, no loggers, the
/// process working directory.
#[derive(Default)]
pub struct ShellBuilder {
    backend: Option<Box<dyn Backend>>,
    loggers: Vec<Box<dyn CommandLogger>>,
    error_handler: Option<Box<dyn ErrorHandler>>,
    cwd: Option<PathBuf>,
}

impl ShellBuilder {
    pub fn backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Register a logger; fan-out order is registration order.
    pub fn logger(mut self, logger: impl CommandLogger + 'static) -> Self {
        self.loggers.push(Box::new(logger));
        self
    }

    pub fn error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Working directory; a relative path is resolved against the process
    /// cwd at build time so the shell always holds an absolute path.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn build(self) -> Result<Shell> {
        let cwd = match self.cwd {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => std::env::current_dir()?.join(dir),
            None => std::env::current_dir()?,
        };

        Ok(Shell {
            backend: self
                .backend
                .unwrap_or_else(|| Box::new(NativeBackend::new())),
            loggers: Mutex::new(self.loggers),
            error_handler: self
                .error_handler
                .unwrap_or_else(|| Box::new(AbortOnFailure)),
            cwd,
        })
    }

    /// Build and wrap in an [`Arc`], ready for [`Shell::activate`].
    pub fn build_shared(self) -> Result<Arc<Shell>> {
        Ok(Arc::new(self.build()?))
    }
}
