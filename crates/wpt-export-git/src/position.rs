// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Chromium commit position helpers
//!
//! A commit position names a commit by its ordinal in a branch's linear
//! history, e.g. `refs/heads/master@{#431915}`. Commit messages carry it in a
//! `Cr-Commit-Position: ` footer.

use crate::error::{GitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Footer label that may precede a commit position
pub const POSITION_LABEL: &str = "Cr-Commit-Position: ";

/// Remove a leading [`POSITION_LABEL`], if present
#[must_use]
pub fn strip_position_label(position: &str) -> &str {
    position.strip_prefix(POSITION_LABEL).unwrap_or(position)
}

/// A parsed commit position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitPosition {
    /// Fully qualified branch ref, e.g. `refs/heads/master`
    pub branch: String,
    /// Ordinal of the commit on that branch
    pub number: u64,
}

impl CommitPosition {
    /// Parse `<ref>@{#<number>}`, with or without the footer label
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidPosition` if the string does not match.
    pub fn parse(position: &str) -> Result<Self> {
        let invalid = || GitError::InvalidPosition {
            position: position.to_string(),
        };

        let stripped = strip_position_label(position.trim());
        let (branch, rest) = stripped.rsplit_once("@{#").ok_or_else(invalid)?;
        let digits = rest.strip_suffix('}').ok_or_else(invalid)?;

        if branch.is_empty()
            || branch.contains(char::is_whitespace)
            || digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self {
            branch: branch.to_string(),
            number,
        })
    }
}

impl fmt::Display for CommitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{{#{}}}", self.branch, self.number)
    }
}
