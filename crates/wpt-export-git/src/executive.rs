// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Process execution
//!
//! Every commit query goes through an [`Executive`], which runs an argument
//! list (program first) and hands back captured standard output.

use crate::error::{GitError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Runs external commands and captures their output
pub trait Executive: Sync {
    /// Run `args[0]` with the remaining arguments and return its stdout
    ///
    /// Output is returned as-is; callers decide whether to trim it.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` on a non-zero exit,
    /// `GitError::Spawn` if the program cannot be started and
    /// `GitError::EmptyCommand` if `args` is empty.
    fn run_command(&self, args: &[&str]) -> Result<String>;
}

/// An [`Executive`] backed by real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemExecutive {
    cwd: Option<PathBuf>,
}

impl SystemExecutive {
    /// Run commands in the current working directory of this process
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command in `dir`
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }

    /// The directory commands run in, if fixed
    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl Executive for SystemExecutive {
    fn run_command(&self, args: &[&str]) -> Result<String> {
        let (program, rest) = args.split_first().ok_or(GitError::EmptyCommand)?;
        let command_line = args.join(" ");

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            command.current_dir(cwd);
        }

        debug!(command = %command_line, cwd = ?self.cwd, "Running command");

        let output = command.output().map_err(|source| {
            warn!(command = %command_line, error = %source, "Failed to start command");
            GitError::Spawn {
                command: command_line.clone(),
                source,
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code();
            warn!(command = %command_line, ?exit_code, %stderr, "Command failed");
            return Err(GitError::CommandFailed {
                command: command_line,
                exit_code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
