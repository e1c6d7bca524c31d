//! Subprocess execution.

use crate::error::{ArchiveError, Result};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;

/// A program plus its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: String,
    /// Arguments, passed to the OS without shell interpretation
    pub args: Vec<String>,
    /// Working directory, if different from the current one
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run inside `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Command line with every word shell-escaped
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_escape)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Escape a word for a POSIX shell.
///
/// Words made only of characters with no shell meaning are returned as is;
/// anything else is wrapped in single quotes.
pub fn shell_escape(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let safe = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ',' | ':' | '=' | '+' | '@'));
    if safe {
        return word.to_string();
    }

    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Runs external programs.
///
/// Implemented by [`SystemRunner`] for real processes and by test doubles.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Run to completion with stdout discarded. A non-zero exit is an error.
    async fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run to completion and return stdout. A non-zero exit is an error.
    async fn capture(&self, invocation: &Invocation) -> Result<String>;
}

/// Spawns real child processes through tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Result<tokio::process::Command> {
        let program = which::which(OsStr::new(&invocation.program)).map_err(|_| {
            ArchiveError::ToolNotFound {
                program: invocation.program.clone(),
            }
        })?;

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let command = invocation.display();
        log::debug!("Running {}", command);

        let status = Self::command(invocation)?
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|source| ArchiveError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ArchiveError::CommandFailed {
                command,
                code: status.code(),
            }
            .into());
        }

        Ok(())
    }

    async fn capture(&self, invocation: &Invocation) -> Result<String> {
        let command = invocation.display();
        log::debug!("Capturing output of {}", command);

        let output = Self::command(invocation)?
            .stdout(Stdio::piped())
            .output()
            .await
            .map_err(|source| ArchiveError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ArchiveError::CommandFailed {
                command,
                code: output.status.code(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
