// src/command/invocation.rs

use std::path::PathBuf;
use std::sync::Arc;

use crate::command::{CallerInfo, CommandFlags, CommandMetadata, CommandResult};
use crate::errors::{Result, ShellError};
use crate::scan::Scanner;
use crate::shell::{self, Shell};

/// A bound invocation of a named program: metadata, construction origin, an
/// optional scanner, and an optional per-invocation working directory.
///
/// Built with a builder-style API and executed either against an explicit
/// [`Shell`] (`run_with`) or against the innermost active instance (`run`).
///
/// ```no_run
/// # use shellrig::{Command, CommandFlags};
/// # async fn demo() -> shellrig::Result<()> {
/// let result = Command::new("echo")
///     .arg("hello")
///     .flags(CommandFlags::QUIET)
///     .run()
///     .await?;
/// assert!(result.success());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    args: Vec<String>,
    flags: CommandFlags,
    origin: CallerInfo,
    scanner: Option<Arc<dyn Scanner>>,
    dir: Option<PathBuf>,
}

impl Command {
    /// Start building a command. The caller's source location is recorded
    /// as the command's origin.
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            flags: CommandFlags::STANDARD,
            origin: CallerInfo::capture(),
            scanner: None,
            dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn flags(mut self, flags: CommandFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Working directory for this invocation. A relative path resolves
    /// against the shell's working directory at run time.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Attach a scanner that will project structured entries from the
    /// captured output once the command completes.
    pub fn scanner(mut self, scanner: Arc<dyn Scanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new(self.name.clone(), self.args.iter().cloned(), self.flags)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub fn full_command(&self) -> Vec<String> {
        self.metadata().full_command()
    }

    /// Where in the script this command was constructed.
    pub fn origin(&self) -> CallerInfo {
        self.origin
    }

    pub(crate) fn assigned_scanner(&self) -> Option<&Arc<dyn Scanner>> {
        self.scanner.as_ref()
    }

    pub(crate) fn dir_override(&self) -> Option<&std::path::Path> {
        self.dir.as_deref()
    }

    /// Run against the innermost active shell instance.
    ///
    /// Fails with [`ShellError::NoActiveInstance`] when no shell has been
    /// activated and none was passed explicitly.
    pub async fn run(&self) -> Result<CommandResult> {
        let shell = shell::context::active().ok_or(ShellError::NoActiveInstance)?;
        shell.run(self).await
    }

    /// Run against an explicit shell instance.
    pub async fn run_with(&self, shell: &Shell) -> Result<CommandResult> {
        shell.run(self).await
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("flags", &self.flags)
            .field("origin", &self.origin)
            .field("dir", &self.dir)
            .field("scanner", &self.scanner.is_some())
            .finish()
    }
}
