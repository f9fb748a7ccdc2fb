// src/backend/native.rs

//! Backend that spawns real processes on the host.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::backend::{Backend, ExecHandle, StreamConfig};
use crate::command::CommandMetadata;
use crate::errors::{Result, ShellError};

/// Executes commands as child processes of the current process.
///
/// Streams are read line-wise by one task per pipe; under merged streams
/// both pipes feed the same channel, so observers see chunks in production
/// order. The child is killed on drop so an abandoned handle cannot leak a
/// process.
#[derive(Debug, Default)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for NativeBackend {
    fn id(&self) -> &'static str {
        "native"
    }

    fn run<'a>(
        &'a self,
        metadata: &'a CommandMetadata,
        cwd: &'a Path,
        streams: StreamConfig,
    ) -> Pin<Box<dyn Future<Output = Result<ExecHandle>> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                command = %metadata.full_command_string(),
                cwd = %cwd.display(),
                ?streams,
                "spawning native process"
            );

            let mut cmd = Command::new(metadata.name());
            cmd.args(metadata.args())
                .current_dir(cwd)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
                command: metadata.name().to_string(),
                source,
            })?;

            let stdout_pipe = child.stdout.take();
            let stderr_pipe = child.stderr.take();

            let (out_tx, out_rx) = mpsc::channel::<String>(64);
            let err_rx = match streams {
                StreamConfig::MergeStreams => {
                    // Both pipes feed the stdout channel; chunk order is
                    // production order across the two streams.
                    spawn_line_reader(stdout_pipe, out_tx.clone());
                    spawn_line_reader(stderr_pipe, out_tx);
                    None
                }
                StreamConfig::SeparateStreams => {
                    let (err_tx, err_rx) = mpsc::channel::<String>(64);
                    spawn_line_reader(stdout_pipe, out_tx);
                    spawn_line_reader(stderr_pipe, err_tx);
                    Some(err_rx)
                }
            };

            let command_name = metadata.name().to_string();
            let wait = Box::pin(async move {
                let status = child.wait().await.map_err(|source| ShellError::Spawn {
                    command: command_name.clone(),
                    source,
                })?;
                let code = status.code().unwrap_or(-1);
                debug!(command = %command_name, exit_code = code, "native process exited");
                Ok(code)
            });

            Ok(ExecHandle {
                stdout: out_rx,
                stderr: err_rx,
                wait,
            })
        })
    }
}

/// Read a pipe line-by-line and forward each line (newline restored) as a
/// chunk. The task ends at end-of-stream, closing its sender.
fn spawn_line_reader<R>(pipe: Option<R>, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(pipe) = pipe else {
        return;
    };

    tokio::spawn(async move {
        let reader = BufReader::new(pipe);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            trace!(len = line.len(), "stream chunk");
            let mut chunk = line;
            chunk.push('\n');
            if tx.send(chunk).await.is_err() {
                // Receiver dropped; stop draining.
                break;
            }
        }
    });
}
