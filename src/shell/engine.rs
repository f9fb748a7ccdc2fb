// src/shell/engine.rs

//! Per-command execution protocol.
//!
//! For each invocation the engine:
//! 1. resolves the working directory,
//! 2. short-circuits inactive or gate-denied commands into skipped results,
//! 3. dispatches to the backend and drains its streams concurrently into
//!    the logger fan-out,
//! 4. runs the scanner over the complete output,
//! 5. builds the immutable result and calls every logger's `log_results`
//!    exactly once, in registration order,
//! 6. consults the error-handler policy for non-skipped, nonzero results.
//!
//! One command completes this protocol before the next starts; within a
//! command, each open stream is forwarded by its own short-lived task so a
//! full pipe on one stream can never block the other.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::backend::{ChunkReceiver, ExecHandle, StreamConfig};
use crate::command::{Command, CommandFlags, CommandMetadata, CommandResult};
use crate::errors::Result;
use crate::loggers::CommandLogger;
use crate::scan::ScanEntry;
use crate::shell::Shell;

#[derive(Debug, Clone, Copy)]
enum StreamSource {
    Stdout,
    Stderr,
}

pub(crate) async fn run_command(shell: &Shell, cmd: &Command) -> Result<CommandResult> {
    let metadata = cmd.metadata();
    let cwd = resolve_cwd(shell.cwd(), cmd.dir_override());

    if metadata.flags().contains(CommandFlags::INACTIVE) {
        debug!(command = %metadata.full_command_string(), "command inactive, skipping");
        return finish_skipped(shell, &metadata, &cwd).await;
    }

    // CLEANUP commands bypass the gate entirely: teardown must run even
    // while an abort is unwinding.
    if !metadata.flags().contains(CommandFlags::CLEANUP)
        && !shell.error_handler().should_run(&metadata)
    {
        debug!(command = %metadata.full_command_string(), "gate denied command, skipping");
        return finish_skipped(shell, &metadata, &cwd).await;
    }

    let mut loggers = shell.loggers().lock().await;
    let streams = select_stream_config(&loggers);

    for logger in loggers.iter_mut() {
        logger.begin(&metadata, &cwd)?;
    }

    info!(
        command = %metadata.full_command_string(),
        cwd = %cwd.display(),
        backend = shell.backend().id(),
        "running command"
    );

    let start_time = Utc::now();
    let handle = shell.backend().run(&metadata, &cwd, streams).await?;
    let ExecHandle {
        stdout,
        stderr,
        wait,
    } = handle;

    let output = drain_streams(stdout, stderr, &mut loggers).await?;
    let exit_code = wait.await?;
    let end_time = Utc::now();

    let entries: Vec<ScanEntry> = cmd
        .assigned_scanner()
        .map(|scanner| scanner.scan(&output))
        .unwrap_or_default();

    let result = CommandResult {
        command: metadata.name().to_string(),
        args: metadata.args().to_vec(),
        cwd,
        output,
        exit_code,
        skipped: false,
        start_time,
        end_time,
        backend: shell.backend().id().to_string(),
    };

    log_results_all(&mut loggers, &result, &entries);
    drop(loggers);

    if exit_code != 0 {
        shell.error_handler().handle(&result)?;
    }

    Ok(result)
}

/// Synthesize a skipped result and route it through the logger pipeline
/// with zero stream activity. The error handler is never consulted.
async fn finish_skipped(
    shell: &Shell,
    metadata: &CommandMetadata,
    cwd: &Path,
) -> Result<CommandResult> {
    let result = CommandResult::skipped(
        metadata.name(),
        metadata.args(),
        cwd,
        shell.backend().id(),
    );

    let mut loggers = shell.loggers().lock().await;
    for logger in loggers.iter_mut() {
        logger.begin(metadata, cwd)?;
    }
    log_results_all(&mut loggers, &result, &[]);

    Ok(result)
}

/// Canonical stream configuration for one invocation: separation wins,
/// because a merged-preference logger can still consume tagged chunks
/// while the reverse would be lossy.
fn select_stream_config(loggers: &[Box<dyn CommandLogger>]) -> StreamConfig {
    if loggers
        .iter()
        .any(|l| l.stream_config() == StreamConfig::SeparateStreams)
    {
        StreamConfig::SeparateStreams
    } else {
        StreamConfig::MergeStreams
    }
}

/// Drain all open streams to every logger and accumulate the canonical
/// output.
///
/// One forwarding task per stream feeds a single tagged channel; the recv
/// loop here delivers each chunk to every logger in registration order and
/// ends once every stream hits end-of-stream. The forwarders are joined
/// before returning, so the caller observes the complete output.
async fn drain_streams(
    stdout: ChunkReceiver,
    stderr: Option<ChunkReceiver>,
    loggers: &mut [Box<dyn CommandLogger>],
) -> Result<String> {
    let (tx, mut rx) = mpsc::channel::<(StreamSource, String)>(64);

    let mut forwarders = Vec::with_capacity(2);
    forwarders.push(tokio::spawn(forward(stdout, StreamSource::Stdout, tx.clone())));
    if let Some(stderr) = stderr {
        forwarders.push(tokio::spawn(forward(stderr, StreamSource::Stderr, tx.clone())));
    }
    // The recv loop ends when the last forwarder drops its sender.
    drop(tx);

    let mut output = String::new();
    while let Some((source, chunk)) = rx.recv().await {
        output.push_str(&chunk);
        for logger in loggers.iter_mut() {
            match source {
                StreamSource::Stdout => logger.log(&chunk, None),
                StreamSource::Stderr => logger.log("", Some(&chunk)),
            }
        }
    }

    for forwarder in forwarders {
        forwarder.await.map_err(anyhow::Error::from)?;
    }

    Ok(output)
}

async fn forward(
    mut rx: ChunkReceiver,
    source: StreamSource,
    tx: mpsc::Sender<(StreamSource, String)>,
) {
    while let Some(chunk) = rx.recv().await {
        if tx.send((source, chunk)).await.is_err() {
            break;
        }
    }
}

/// Call `log_results` on every logger in registration order. A logger
/// failure is reported but does not fail the command: the result is final
/// at this point and the remaining loggers still get their callback.
fn log_results_all(
    loggers: &mut [Box<dyn CommandLogger>],
    result: &CommandResult,
    entries: &[ScanEntry],
) {
    for logger in loggers.iter_mut() {
        if let Err(err) = logger.log_results(result, entries) {
            warn!(
                command = %result.command,
                error = %err,
                "logger failed while recording results"
            );
        }
    }
}

/// Resolve the invocation's working directory: explicit absolute wins,
/// explicit relative resolves against the shell's cwd, otherwise the
/// shell's cwd is used.
fn resolve_cwd(shell_cwd: &Path, dir_override: Option<&Path>) -> PathBuf {
    match dir_override {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => shell_cwd.join(dir),
        None => shell_cwd.to_path_buf(),
    }
}
