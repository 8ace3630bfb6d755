// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for wpt-export-git

use thiserror::Error;

/// Errors that can occur while querying a Chromium commit
#[derive(Debug, Error)]
pub enum GitError {
    /// Neither a SHA nor a commit position was supplied
    #[error("requires sha or position")]
    MissingReference,

    /// Both a SHA and a commit position were supplied
    #[error("cannot accept both sha and position (sha: {sha}, position: {position})")]
    ConflictingReference {
        /// The SHA that was supplied
        sha: String,
        /// The commit position that was supplied
        position: String,
    },

    /// An external command exited with a non-zero status
    #[error("command failed: {command} (exit code: {}): {stderr}", display_exit_code(.exit_code))]
    CommandFailed {
        /// The full command line that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        exit_code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// An external command could not be started
    #[error("failed to run {command}: {source}")]
    Spawn {
        /// The full command line that was attempted
        command: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An empty argument list was passed to the executive
    #[error("cannot run an empty command")]
    EmptyCommand,

    /// No Chromium checkout contains the given path
    #[error("Chromium checkout not found from: {path}")]
    CheckoutNotFound {
        /// The path discovery started from
        path: String,
    },

    /// A string is not of the form `<ref>@{#<number>}`
    #[error("Invalid commit position: {position}")]
    InvalidPosition {
        /// The rejected position string
        position: String,
    },

    /// A path cannot be passed to git because it is not valid UTF-8
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path
        path: String,
    },

    /// Repository discovery failed for a reason other than "not found"
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

impl GitError {
    /// Whether this error was raised while constructing a commit reference
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::MissingReference | Self::ConflictingReference { .. }
        )
    }

    /// Whether this error came from running an external tool
    #[must_use]
    pub fn is_external_tool(&self) -> bool {
        matches!(
            self,
            Self::CommandFailed { .. } | Self::Spawn { .. } | Self::EmptyCommand
        )
    }
}

fn display_exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Result type alias using [`GitError`]
pub type Result<T> = std::result::Result<T, GitError>;
