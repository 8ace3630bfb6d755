// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The environment commit queries run against

use crate::error::Result;
use crate::executive::{Executive, SystemExecutive};
use crate::finder::{PathFinder, WebKitFinder};
use std::path::Path;

/// Bundles process execution and path finding
///
/// Hosts are passed explicitly to everything that needs them, so tests can
/// substitute stubs for either half. Hosts are `Sync` so a commit reference
/// can be shared between threads.
pub trait Host: Sync {
    /// Runs external commands
    fn executive(&self) -> &dyn Executive;

    /// Resolves paths inside the checkout
    fn finder(&self) -> &dyn PathFinder;
}

/// A [`Host`] that runs real processes inside a real checkout
#[derive(Debug, Clone)]
pub struct SystemHost {
    executive: SystemExecutive,
    finder: WebKitFinder,
}

impl SystemHost {
    /// Assemble a host from explicit parts
    #[must_use]
    pub fn new(executive: SystemExecutive, finder: WebKitFinder) -> Self {
        Self { executive, finder }
    }

    /// Discover the checkout containing `start` and run commands at its root
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutNotFound` if no Chromium checkout
    /// contains `start`.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let finder = WebKitFinder::discover(start)?;
        let executive = SystemExecutive::in_dir(finder.chromium_base());
        Ok(Self::new(executive, finder))
    }

    /// The concrete finder, for callers that need more than [`PathFinder`]
    #[must_use]
    pub fn webkit_finder(&self) -> &WebKitFinder {
        &self.finder
    }
}

impl Host for SystemHost {
    fn executive(&self) -> &dyn Executive {
        &self.executive
    }

    fn finder(&self) -> &dyn PathFinder {
        &self.finder
    }
}
