// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Locating directories inside a Chromium checkout
//!
//! Paths are built from segments relative to either the checkout root (the
//! "Chromium base") or `third_party/WebKit` beneath it (the "WebKit base").

use crate::error::{GitError, Result};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the WebKit base relative to the Chromium base
pub const WEBKIT_SUBDIR: [&str; 2] = ["third_party", "WebKit"];

/// Resolves paths inside a Chromium checkout
pub trait PathFinder: Sync {
    /// Join `segments` onto the absolute WebKit base directory
    ///
    /// # Errors
    ///
    /// Returns an error if the WebKit base cannot be determined.
    fn path_from_webkit_base(&self, segments: &[&str]) -> Result<PathBuf>;
}

/// A [`PathFinder`] rooted at a concrete Chromium checkout
#[derive(Debug, Clone)]
pub struct WebKitFinder {
    chromium_base: PathBuf,
}

impl WebKitFinder {
    /// Use `chromium_base` as the checkout root without any discovery
    #[must_use]
    pub fn new(chromium_base: impl Into<PathBuf>) -> Self {
        Self {
            chromium_base: chromium_base.into(),
        }
    }

    /// Discover the Chromium checkout containing `start`
    ///
    /// Walks up from `start` to the enclosing git working tree and requires
    /// `third_party/WebKit` to exist beneath it.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutNotFound` if there is no enclosing
    /// repository, it is bare, or it has no WebKit directory. Any other
    /// failure to open the repository is returned as `GitError::Git2`.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        let not_found = || GitError::CheckoutNotFound {
            path: start.display().to_string(),
        };

        let repo = Repository::discover(start).map_err(|e| discovery_error(start, e))?;
        let workdir = repo.workdir().ok_or_else(not_found)?;

        let finder = Self::new(workdir);
        if !finder.webkit_base().is_dir() {
            debug!(workdir = %workdir.display(), "Repository has no WebKit directory");
            return Err(not_found());
        }

        debug!(chromium_base = %finder.chromium_base.display(), "Discovered Chromium checkout");
        Ok(finder)
    }

    /// The checkout root
    #[must_use]
    pub fn chromium_base(&self) -> &Path {
        &self.chromium_base
    }

    /// `<chromium base>/third_party/WebKit`
    #[must_use]
    pub fn webkit_base(&self) -> PathBuf {
        self.path_from_chromium_base(&WEBKIT_SUBDIR)
    }

    /// Join `segments` onto the checkout root
    #[must_use]
    pub fn path_from_chromium_base(&self, segments: &[&str]) -> PathBuf {
        segments
            .iter()
            .fold(self.chromium_base.clone(), |path, segment| path.join(segment))
    }
}

fn discovery_error(start: &Path, err: git2::Error) -> GitError {
    if err.code() == ErrorCode::NotFound {
        GitError::CheckoutNotFound {
            path: start.display().to_string(),
        }
    } else {
        debug!(start = %start.display(), error = %err, "Repository discovery failed");
        GitError::Git2(err)
    }
}

impl PathFinder for WebKitFinder {
    fn path_from_webkit_base(&self, segments: &[&str]) -> Result<PathBuf> {
        Ok(segments
            .iter()
            .fold(self.webkit_base(), |path, segment| path.join(segment)))
    }
}
