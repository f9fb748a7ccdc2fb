// src/lib.rs

//! shellrig is a scripting harness that runs shell-like commands through a
//! pluggable execution backend, streams their output to a fan-out of
//! loggers, projects structured entries from the captured text, and applies
//! a configurable failure policy.
//!
//! The core pieces:
//! - [`command`]: immutable metadata, flags, caller provenance, results,
//!   and the [`Command`] invocation builder.
//! - [`backend`]: the [`Backend`] contract plus native and dry-run
//!   implementations.
//! - [`loggers`]: the [`CommandLogger`] fan-out (console, multi-file,
//!   null).
//! - [`scan`]: pure output scanners.
//! - [`policy`]: the error-handler chain (allow-all, keep-going,
//!   abort-on-failure).
//! - [`shell`]: the orchestrator, covering the per-command protocol, the
//!   builder, and the active-instance stack.

pub mod backend;
pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod loggers;
pub mod logging;
pub mod policy;
pub mod scan;
pub mod shell;

use std::sync::Arc;

use tracing::info;

use crate::backend::{DryRunBackend, NativeBackend};
use crate::cli::CliArgs;
use crate::config::{BackendKind, PolicyKind, RunnerConfig};
use crate::loggers::{ConsoleLogger, MultiFileLogger, MultiFileOptions};
use crate::policy::{AbortOnFailure, AllowAll, KeepGoing};

pub use backend::{Backend, ChunkReceiver, ExecHandle, StreamConfig, WaitHandle};
pub use command::{CallerInfo, Command, CommandFlags, CommandMetadata, CommandResult};
pub use errors::{Result, ShellError};
pub use loggers::CommandLogger;
pub use policy::ErrorHandler;
pub use scan::{RegexScanner, ScanEntry, Scanner};
pub use shell::{Shell, ShellBuilder, ShellScope};

/// High-level entry point used by `main.rs`: load the runner config, build
/// a shell around it, run the single trailing command, and hand back its
/// exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = config::load(&args.config)?;
    let shell = build_shell(&cfg, args.dry_run)?;

    let (name, rest) = args
        .command
        .split_first()
        .ok_or_else(|| ShellError::Config("no command given".to_string()))?;

    let cmd = Command::new(name).args(rest.iter().cloned());
    let result = cmd.run_with(&shell).await?;

    info!(
        command = %result.full_command_string(),
        exit_code = result.exit_code,
        "command finished"
    );
    Ok(result.exit_code)
}

fn build_shell(cfg: &RunnerConfig, dry_run: bool) -> Result<Arc<Shell>> {
    let mut builder = Shell::builder();

    builder = if dry_run || cfg.run.backend == BackendKind::DryRun {
        builder.backend(DryRunBackend::new())
    } else {
        builder.backend(NativeBackend::new())
    };

    builder = match cfg.run.policy {
        PolicyKind::Abort => builder.error_handler(AbortOnFailure),
        PolicyKind::KeepGoing => builder.error_handler(KeepGoing),
        PolicyKind::AllowAll => builder.error_handler(AllowAll),
    };

    if cfg.console.enabled {
        builder = builder.logger(
            ConsoleLogger::new()
                .with_header(cfg.console.header)
                .with_footer(cfg.console.footer),
        );
    }

    if let Some(dir) = &cfg.logs.dir {
        builder = builder.logger(MultiFileLogger::with_options(
            dir.clone(),
            MultiFileOptions {
                clean: cfg.logs.clean,
                command_header: cfg.logs.command_header,
                command_footer: cfg.logs.command_footer,
            },
        )?);
    }

    builder.build_shared()
}
