// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Stub collaborators for unit tests

use crate::error::{GitError, Result};
use crate::executive::Executive;
use crate::finder::PathFinder;
use crate::host::Host;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Answers commands from a table keyed by the space-joined command line
#[derive(Debug, Default)]
pub(crate) struct StubExecutive {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubExecutive {
    pub(crate) fn with_output(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Executive for StubExecutive {
    fn run_command(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());
        self.outputs
            .get(&command)
            .cloned()
            .ok_or(GitError::CommandFailed {
                command,
                exit_code: Some(1),
                stderr: "unexpected command".to_string(),
            })
    }
}

/// Counts lookups and joins segments onto a fixed base
#[derive(Debug)]
pub(crate) struct StubFinder {
    base: PathBuf,
    lookups: AtomicUsize,
}

impl StubFinder {
    pub(crate) fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for StubFinder {
    fn default() -> Self {
        Self::new("/checkout/third_party/WebKit")
    }
}

impl PathFinder for StubFinder {
    fn path_from_webkit_base(&self, segments: &[&str]) -> Result<PathBuf> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        // Widen the window in which concurrent first lookups could overlap
        std::thread::yield_now();
        Ok(segments
            .iter()
            .fold(self.base.clone(), |path, segment| path.join(segment)))
    }
}

#[derive(Debug, Default)]
pub(crate) struct StubHost {
    pub(crate) executive: StubExecutive,
    pub(crate) finder: StubFinder,
}

impl StubHost {
    pub(crate) fn new(executive: StubExecutive) -> Self {
        Self {
            executive,
            finder: StubFinder::default(),
        }
    }

    pub(crate) fn with_finder_base(executive: StubExecutive, base: impl Into<PathBuf>) -> Self {
        Self {
            executive,
            finder: StubFinder::new(base),
        }
    }
}

impl Host for StubHost {
    fn executive(&self) -> &dyn Executive {
        &self.executive
    }

    fn finder(&self) -> &dyn PathFinder {
        &self.finder
    }
}
