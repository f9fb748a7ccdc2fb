// src/config.rs

//! Runner configuration (TOML) for the `shellrig` binary.
//!
//! The library itself is configured in code; this file only shapes the
//! shell the binary builds around the single command it runs. All enums
//! are strongly typed and validated during deserialization.
//!
//! ```toml
//! [run]
//! backend = "native"        # or "dry-run"
//! policy = "abort"          # or "keep-going", "allow-all"
//!
//! [console]
//! enabled = true
//! header = false
//! footer = true
//!
//! [logs]
//! dir = "logs"              # omit to disable the multi-file logger
//! clean = false
//! command_header = true
//! command_footer = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub console: ConsoleSection,
    #[serde(default)]
    pub logs: LogsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub policy: PolicyKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub header: bool,
    #[serde(default = "default_true")]
    pub footer: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsSection {
    /// Output directory for the multi-file logger; `None` disables it.
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub clean: bool,
    #[serde(default = "default_true")]
    pub command_header: bool,
    #[serde(default = "default_true")]
    pub command_footer: bool,
}

/// Which backend the runner builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Native,
    DryRun,
}

/// Which error-handling policy the runner installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    Abort,
    KeepGoing,
    AllowAll,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            enabled: true,
            header: false,
            footer: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load the runner config from `path`. A missing file yields the defaults;
/// a present but invalid file is an error.
pub fn load(path: impl AsRef<Path>) -> Result<RunnerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(RunnerConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: RunnerConfig = toml::from_str(&contents)?;
    Ok(config)
}
