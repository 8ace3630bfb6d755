// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Chromium commit references
//!
//! A [`ChromiumCommit`] names one commit, either by SHA or by commit position,
//! and answers questions about it by running `git` through a [`Host`].

use crate::error::{GitError, Result};
use crate::host::Host;
use crate::position::{CommitPosition, strip_position_label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Branch that "behind" is measured against
pub const MAINLINE_REF: &str = "origin/master";

/// Imported web-platform-tests directory, relative to the WebKit base
pub const WPT_DIR_SEGMENTS: [&str; 3] = ["LayoutTests", "imported", "wpt"];

/// A reference to a single Chromium commit
///
/// References are `Send + Sync`. The WPT directory is looked up at most once
/// per reference, even when several threads ask for it at the same time.
pub struct ChromiumCommit<'h> {
    host: &'h dyn Host,
    sha: String,
    position: Option<String>,
    wpt_dir: Mutex<Option<PathBuf>>,
}

impl<'h> ChromiumCommit<'h> {
    /// Create a reference from exactly one of `sha` or `position`
    ///
    /// `position` may be bare (`refs/heads/master@{#431915}`) or carry the
    /// `Cr-Commit-Position: ` footer label, which is stripped before the
    /// position is resolved to a SHA. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingReference` if neither is given,
    /// `GitError::ConflictingReference` if both are, and propagates any
    /// failure of `git crrev-parse`.
    pub fn new(host: &'h dyn Host, sha: Option<&str>, position: Option<&str>) -> Result<Self> {
        let sha = sha.filter(|s| !s.is_empty());
        let position = position.filter(|p| !p.is_empty());

        let (sha, position) = match (sha, position) {
            (None, None) => return Err(GitError::MissingReference),
            (Some(sha), Some(position)) => {
                return Err(GitError::ConflictingReference {
                    sha: sha.to_string(),
                    position: position.to_string(),
                });
            }
            (Some(sha), None) => (sha.to_string(), None),
            (None, Some(position)) => {
                let position = strip_position_label(position);
                let sha = Self::position_to_sha(host, position)?;
                (sha, Some(position.to_string()))
            }
        };

        debug!(%sha, ?position, "Created commit reference");
        Ok(Self {
            host,
            sha,
            position,
            wpt_dir: Mutex::new(None),
        })
    }

    /// Create a reference from a SHA
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingReference` if `sha` is empty.
    pub fn from_sha(host: &'h dyn Host, sha: &str) -> Result<Self> {
        Self::new(host, Some(sha), None)
    }

    /// Create a reference from a commit position, resolving its SHA
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingReference` if `position` is empty and
    /// propagates any failure of `git crrev-parse`.
    pub fn from_position(host: &'h dyn Host, position: &str) -> Result<Self> {
        Self::new(host, None, Some(position))
    }

    /// Resolve a commit position to a SHA with `git crrev-parse`
    ///
    /// The position is passed through unvalidated; malformed or unknown
    /// positions surface as the tool's own failure.
    ///
    /// # Errors
    ///
    /// Returns the executive's error if the command fails.
    pub fn position_to_sha(host: &dyn Host, position: &str) -> Result<String> {
        let output = host
            .executive()
            .run_command(&["git", "crrev-parse", position])?;
        Ok(output.trim().to_string())
    }

    /// The commit SHA
    #[must_use]
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// The label-stripped commit position, if constructed from one
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    /// Number of commits on `origin/master` that this commit does not contain
    ///
    /// Counts the lines of `git rev-list <sha>..origin/master`. Following
    /// git's `A..B` convention the commit itself is excluded and the mainline
    /// tip is included, so the tip is 0 behind.
    ///
    /// # Errors
    ///
    /// Returns the executive's error if the command fails.
    pub fn num_behind_master(&self) -> Result<usize> {
        let range = format!("{}..{MAINLINE_REF}", self.sha);
        let output = self.run(&["git", "rev-list", &range])?;
        Ok(output.lines().count())
    }

    /// The commit subject, as printed by `git show --format=%s`
    ///
    /// # Errors
    ///
    /// Returns the executive's error if the command fails.
    pub fn subject(&self) -> Result<String> {
        self.show("%s")
    }

    /// The commit body without the subject, as printed by `git show --format=%b`
    ///
    /// # Errors
    ///
    /// Returns the executive's error if the command fails.
    pub fn body(&self) -> Result<String> {
        self.show("%b")
    }

    /// The full commit message, subject and body
    ///
    /// # Errors
    ///
    /// Returns the executive's error if the command fails.
    pub fn message(&self) -> Result<String> {
        self.show("%B")
    }

    /// A `git format-patch` patch of this commit, limited to the WPT directory
    ///
    /// # Errors
    ///
    /// Returns an error if the WPT directory cannot be located, its path is
    /// not valid UTF-8 (`GitError::NonUtf8Path`) or the command fails.
    pub fn format_patch(&self) -> Result<String> {
        // TODO: exclude -expected.txt baselines and MANIFEST.json from the patch
        let wpt_dir = self.absolute_chromium_wpt_dir()?;
        let wpt_dir = wpt_dir.to_str().ok_or_else(|| GitError::NonUtf8Path {
            path: wpt_dir.display().to_string(),
        })?;
        self.run(&[
            "git",
            "format-patch",
            "-1",
            "--stdout",
            &self.sha,
            wpt_dir,
        ])
    }

    /// Absolute path of the imported WPT directory
    ///
    /// Looked up through the host's finder on first use and cached for the
    /// lifetime of this reference. Lookup failures are not cached.
    ///
    /// # Errors
    ///
    /// Returns the finder's error if the lookup fails.
    pub fn absolute_chromium_wpt_dir(&self) -> Result<PathBuf> {
        let mut cached = self.wpt_dir.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ref path) = *cached {
            return Ok(path.clone());
        }

        let path = self.host.finder().path_from_webkit_base(&WPT_DIR_SEGMENTS)?;
        debug!(path = %path.display(), "Resolved WPT directory");
        *cached = Some(path.clone());
        Ok(path)
    }

    /// Gather subject, body and mainline distance into one value
    ///
    /// # Errors
    ///
    /// Returns the first error from the underlying queries.
    pub fn summary(&self) -> Result<CommitSummary> {
        Ok(CommitSummary {
            sha: self.sha.clone(),
            position: self.position.clone(),
            position_number: self
                .position
                .as_deref()
                .and_then(|p| CommitPosition::parse(p).ok())
                .map(|p| p.number),
            subject: self.subject()?.trim_end().to_string(),
            body: self.body()?.trim_end().to_string(),
            commits_behind_master: self.num_behind_master()?,
        })
    }

    fn show(&self, format: &str) -> Result<String> {
        let format = format!("--format={format}");
        self.run(&["git", "show", &format, "--no-patch", &self.sha])
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.host.executive().run_command(args)
    }
}

impl fmt::Debug for ChromiumCommit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromiumCommit")
            .field("sha", &self.sha)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ChromiumCommit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(ref position) => write!(f, "{} ({position})", self.short_sha()),
            None => f.write_str(self.short_sha()),
        }
    }
}

/// Serialisable snapshot of a commit, for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// The commit SHA
    pub sha: String,
    /// Commit position the reference was created from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Ordinal parsed from `position`, when it is well formed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_number: Option<u64>,
    /// First line of the message, trailing whitespace removed
    pub subject: String,
    /// Message body, trailing whitespace removed
    pub body: String,
    /// See [`ChromiumCommit::num_behind_master`]
    pub commits_behind_master: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubExecutive, StubHost};
    use similar_asserts::assert_eq;

    const SHA: &str = "1945ab9c752534e733c38ba0109dc3b741f0a6eb";
    const POSITION: &str = "refs/heads/master@{#431915}";

    fn host_with(command: &str, output: &str) -> StubHost {
        StubHost::new(StubExecutive::default().with_output(command, output))
    }

    fn resolving_host() -> StubHost {
        host_with(&format!("git crrev-parse {POSITION}"), "abc123\n")
    }

    #[test]
    fn test_requires_sha_or_position() {
        let host = StubHost::default();
        let result = ChromiumCommit::new(&host, None, None);
        assert!(matches!(result, Err(GitError::MissingReference)));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let host = StubHost::default();
        let result = ChromiumCommit::new(&host, Some(""), Some(""));
        assert!(matches!(result, Err(GitError::MissingReference)));
        assert!(host.executive.calls().is_empty());
    }

    #[test]
    fn test_rejects_sha_and_position() {
        let host = resolving_host();
        let err = ChromiumCommit::new(&host, Some(SHA), Some(POSITION)).unwrap_err();
        assert!(err.is_construction());
        assert!(host.executive.calls().is_empty(), "nothing should run");
    }

    #[test]
    fn test_from_sha_runs_nothing() {
        let host = StubHost::default();
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(commit.sha(), SHA);
        assert_eq!(commit.position(), None);
        assert!(host.executive.calls().is_empty());
    }

    #[test]
    fn test_position_resolves_to_trimmed_sha() {
        let host = resolving_host();
        let commit = ChromiumCommit::from_position(&host, POSITION).expect("construct");
        assert_eq!(commit.sha(), "abc123");
        assert_eq!(commit.position(), Some(POSITION));
    }

    #[test]
    fn test_position_label_is_stripped_before_resolution() {
        let host = resolving_host();
        let commit =
            ChromiumCommit::from_position(&host, &format!("Cr-Commit-Position: {POSITION}"))
                .expect("construct");
        assert_eq!(
            host.executive.calls(),
            vec![format!("git crrev-parse {POSITION}")]
        );
        assert_eq!(commit.position(), Some(POSITION));
        assert_eq!(commit.sha(), "abc123");
    }

    #[test]
    fn test_resolution_failure_propagates() {
        let host = StubHost::default();
        let err = ChromiumCommit::from_position(&host, "refs/heads/master@{#0}").unwrap_err();
        assert!(err.is_external_tool());
    }

    #[test]
    fn test_num_behind_master_counts_lines() {
        let range = format!("git rev-list {SHA}..origin/master");
        for (output, expected) in [("", 0), ("aaa\n", 1), ("aaa\nbbb\nccc\n", 3)] {
            let host = host_with(&range, output);
            let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
            assert_eq!(commit.num_behind_master().expect("count"), expected);
        }
    }

    #[test]
    fn test_subject_is_unmodified() {
        let host = host_with(
            &format!("git show --format=%s --no-patch {SHA}"),
            "Add a thing\n",
        );
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(commit.subject().expect("subject"), "Add a thing\n");
    }

    #[test]
    fn test_body_is_unmodified() {
        let body = "Longer text.\n\nBUG=123\nCr-Commit-Position: refs/heads/master@{#1}\n\n";
        let host = host_with(&format!("git show --format=%b --no-patch {SHA}"), body);
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(commit.body().expect("body"), body);
    }

    #[test]
    fn test_message_is_unmodified() {
        let message = "Add a thing\n\nLonger text.\n\n";
        let host = host_with(&format!("git show --format=%B --no-patch {SHA}"), message);
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(commit.message().expect("message"), message);
    }

    #[test]
    fn test_wpt_dir_is_memoized() {
        let host = StubHost::default();
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");

        let first = commit.absolute_chromium_wpt_dir().expect("first");
        let second = commit.absolute_chromium_wpt_dir().expect("second");

        assert_eq!(first, second);
        assert_eq!(
            first,
            PathBuf::from("/checkout/third_party/WebKit/LayoutTests/imported/wpt")
        );
        assert_eq!(host.finder.lookups(), 1);
    }

    #[test]
    fn test_wpt_dir_is_per_instance() {
        let host = StubHost::default();
        let a = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        let b = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        a.absolute_chromium_wpt_dir().expect("a");
        b.absolute_chromium_wpt_dir().expect("b");
        assert_eq!(host.finder.lookups(), 2);
    }

    #[test]
    fn test_wpt_dir_is_looked_up_once_across_threads() {
        let host = StubHost::default();
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        let commit = &commit;

        let paths: Vec<PathBuf> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(move || commit.absolute_chromium_wpt_dir().expect("wpt dir")))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("thread"))
                .collect()
        });

        assert_eq!(paths.len(), 8);
        assert!(paths.iter().all(|path| *path == paths[0]));
        assert_eq!(host.finder.lookups(), 1);
    }

    #[test]
    fn test_commit_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChromiumCommit<'static>>();
    }

    #[cfg(unix)]
    #[test]
    fn test_format_patch_rejects_non_utf8_wpt_dir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let base = PathBuf::from(OsStr::from_bytes(b"/checkout/\xff/third_party/WebKit"));
        let host = StubHost::with_finder_base(StubExecutive::default(), base);
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");

        let err = commit.format_patch().unwrap_err();
        match err {
            GitError::NonUtf8Path { path } => assert!(path.ends_with("LayoutTests/imported/wpt")),
            other => panic!("Expected NonUtf8Path error, got {other:?}"),
        }
        assert!(host.executive.calls().is_empty(), "git must not run");
    }

    #[test]
    fn test_format_patch_limits_to_wpt_dir() {
        let patch = "From 1945ab9 Mon Sep 17 00:00:00 2001\n";
        let host = host_with(
            &format!(
                "git format-patch -1 --stdout {SHA} /checkout/third_party/WebKit/LayoutTests/imported/wpt"
            ),
            patch,
        );
        let commit = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(commit.format_patch().expect("patch"), patch);
        assert_eq!(host.finder.lookups(), 1);
    }

    #[test]
    fn test_short_sha_and_display() {
        let host = resolving_host();
        let by_sha = ChromiumCommit::from_sha(&host, SHA).expect("construct");
        assert_eq!(by_sha.short_sha(), "1945ab9");
        assert_eq!(by_sha.to_string(), "1945ab9");

        let by_position = ChromiumCommit::from_position(&host, POSITION).expect("construct");
        assert_eq!(by_position.short_sha(), "abc123");
        assert_eq!(by_position.to_string(), format!("abc123 ({POSITION})"));
    }

    #[test]
    fn test_summary() {
        let executive = StubExecutive::default()
            .with_output(&format!("git crrev-parse {POSITION}"), format!("{SHA}\n").as_str())
            .with_output(
                &format!("git show --format=%s --no-patch {SHA}"),
                "Add a thing\n",
            )
            .with_output(
                &format!("git show --format=%b --no-patch {SHA}"),
                "Details.\n\n",
            )
            .with_output(&format!("git rev-list {SHA}..origin/master"), "a\nb\n");
        let host = StubHost::new(executive);
        let commit = ChromiumCommit::from_position(&host, POSITION).expect("construct");

        let summary = commit.summary().expect("summary");
        assert_eq!(
            summary,
            CommitSummary {
                sha: SHA.to_string(),
                position: Some(POSITION.to_string()),
                position_number: Some(431_915),
                subject: "Add a thing".to_string(),
                body: "Details.".to_string(),
                commits_behind_master: 2,
            }
        );
    }

    #[test]
    fn test_summary_json_omits_missing_position() {
        let summary = CommitSummary {
            sha: SHA.to_string(),
            position: None,
            position_number: None,
            subject: "s".to_string(),
            body: String::new(),
            commits_behind_master: 0,
        };
        let json = serde_json::to_string(&summary).expect("serialize");
        assert!(json.contains("\"sha\":"));
        assert!(!json.contains("position"));
    }
}
