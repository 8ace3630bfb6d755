// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! wpt-export-git: Chromium commit queries for wpt-export
//!
//! This library crate answers questions about a single Chromium commit
//! (message, mainline distance, a patch limited to the imported
//! web-platform-tests directory) by running `git` through an injectable
//! [`Host`].

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use wpt_export_git::{ChromiumCommit, SystemHost};
//!
//! let host = SystemHost::discover(".").expect("find checkout");
//! let commit = ChromiumCommit::from_position(&host, "refs/heads/master@{#431915}")
//!     .expect("resolve position");
//!
//! println!("{} - {}", commit.short_sha(), commit.subject().expect("subject").trim());
//! println!("{} commits behind master", commit.num_behind_master().expect("count"));
//! ```

pub mod commit;
pub mod error;
pub mod executive;
pub mod finder;
pub mod host;
pub mod position;

#[cfg(test)]
mod test_support;

pub use commit::{ChromiumCommit, CommitSummary};
pub use error::{GitError, Result};
pub use executive::{Executive, SystemExecutive};
pub use finder::{PathFinder, WebKitFinder};
pub use host::{Host, SystemHost};
pub use position::{CommitPosition, POSITION_LABEL, strip_position_label};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{ChromiumCommit, CommitSummary};
    pub use crate::error::GitError;
    pub use crate::host::{Host, SystemHost};
    pub use crate::position::CommitPosition;
}
