use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use shellrig::{Backend, CommandMetadata, ExecHandle, Result, StreamConfig};

/// Scripted response for one command name.
#[derive(Debug, Clone, Default)]
pub struct FakeResponse {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub exit_code: i32,
}

impl FakeResponse {
    /// Successful run producing the given stdout chunks.
    pub fn ok(stdout: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            stdout: stdout.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Failed run with the given exit code and no output.
    pub fn fail(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stderr = stderr.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

/// One recorded `run` invocation.
#[derive(Debug, Clone)]
pub struct FakeCall {
    pub name: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub streams: StreamConfig,
}

/// A backend that never spawns processes: it records which commands were
/// dispatched and replays scripted stdout/stderr chunks and exit codes.
///
/// Commands without a scripted response succeed with no output.
#[derive(Default)]
pub struct FakeBackend {
    responses: HashMap<String, FakeResponse>,
    calls: Arc<Mutex<Vec<FakeCall>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: impl Into<String>, response: FakeResponse) -> Self {
        self.responses.insert(command.into(), response);
        self
    }

    /// Handle onto the recorded calls, for assertions after the backend
    /// has been moved into a shell.
    pub fn calls(&self) -> Arc<Mutex<Vec<FakeCall>>> {
        Arc::clone(&self.calls)
    }
}

impl Backend for FakeBackend {
    fn id(&self) -> &'static str {
        "fake"
    }

    fn run<'a>(
        &'a self,
        metadata: &'a CommandMetadata,
        cwd: &'a Path,
        streams: StreamConfig,
    ) -> Pin<Box<dyn Future<Output = Result<ExecHandle>> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut calls = self.calls.lock().unwrap();
                calls.push(FakeCall {
                    name: metadata.name().to_string(),
                    args: metadata.args().to_vec(),
                    cwd: cwd.to_path_buf(),
                    streams,
                });
            }

            let response = self
                .responses
                .get(metadata.name())
                .cloned()
                .unwrap_or_default();

            let (out_tx, out_rx) = mpsc::channel::<String>(16);
            let err_rx = match streams {
                StreamConfig::MergeStreams => {
                    // Merged: stdout chunks first, then stderr chunks, all
                    // through the single channel.
                    let chunks: Vec<String> = response
                        .stdout
                        .iter()
                        .chain(response.stderr.iter())
                        .cloned()
                        .collect();
                    tokio::spawn(send_all(out_tx, chunks));
                    None
                }
                StreamConfig::SeparateStreams => {
                    let (err_tx, err_rx) = mpsc::channel::<String>(16);
                    tokio::spawn(send_all(out_tx, response.stdout.clone()));
                    tokio::spawn(send_all(err_tx, response.stderr.clone()));
                    Some(err_rx)
                }
            };

            let exit_code = response.exit_code;
            Ok(ExecHandle {
                stdout: out_rx,
                stderr: err_rx,
                wait: Box::pin(async move { Ok(exit_code) }),
            })
        })
    }
}

async fn send_all(tx: mpsc::Sender<String>, chunks: Vec<String>) {
    for chunk in chunks {
        if tx.send(chunk).await.is_err() {
            break;
        }
    }
}
