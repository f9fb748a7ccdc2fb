// src/cli.rs

//! CLI argument parsing for the runner binary using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `shellrig`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shellrig",
    version,
    about = "Run a command through the shellrig scripting harness.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the runner config file (TOML). Missing file means defaults.
    #[arg(long, value_name = "PATH", default_value = "Shellrig.toml")]
    pub config: String,

    /// Display the command instead of executing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHELLRIG_LOG` or a default level is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The command to run, followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, value_name = "CMD [ARGS]...")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
