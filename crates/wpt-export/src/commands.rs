//! Command dispatch
//!
//! Each subcommand builds a [`ChromiumCommit`] against the given host and
//! writes the answer to `out`. Git output is written through unmodified.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};
use wpt_export_git::commit::WPT_DIR_SEGMENTS;
use wpt_export_git::{ChromiumCommit, CommitSummary, Host, strip_position_label};

use crate::config::{Command, CommitArgs};

/// Run one subcommand against `host`
///
/// # Errors
///
/// Returns an error if the commit cannot be resolved, a git query fails or
/// writing to `out` fails.
pub fn run(command: &Command, host: &dyn Host, out: &mut dyn Write) -> Result<()> {
    debug!(?command, "Dispatching command");
    match command {
        Command::Show { commit, json } => {
            let commit = open_commit(host, commit)?;
            let summary = commit
                .summary()
                .with_context(|| format!("failed to summarise {commit}"))?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &summary)?;
                writeln!(out)?;
            } else {
                write_summary(out, &summary)?;
            }
        }
        Command::Subject { commit } => {
            let commit = open_commit(host, commit)?;
            out.write_all(commit.subject()?.as_bytes())?;
        }
        Command::Body { commit } => {
            let commit = open_commit(host, commit)?;
            out.write_all(commit.body()?.as_bytes())?;
        }
        Command::Message { commit } => {
            let commit = open_commit(host, commit)?;
            out.write_all(commit.message()?.as_bytes())?;
        }
        Command::Patch { commit } => {
            let commit = open_commit(host, commit)?;
            let patch = commit
                .format_patch()
                .with_context(|| format!("failed to format patch for {commit}"))?;
            if patch.is_empty() {
                info!(%commit, "Commit does not touch the WPT directory");
            }
            out.write_all(patch.as_bytes())?;
        }
        Command::Behind { commit } => {
            let commit = open_commit(host, commit)?;
            writeln!(out, "{}", commit.num_behind_master()?)?;
        }
        Command::Resolve { position } => {
            let position = strip_position_label(position);
            let sha = ChromiumCommit::position_to_sha(host, position)
                .with_context(|| format!("failed to resolve {position}"))?;
            writeln!(out, "{sha}")?;
        }
        Command::WptDir => {
            let path = host.finder().path_from_webkit_base(&WPT_DIR_SEGMENTS)?;
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

fn open_commit<'h>(host: &'h dyn Host, args: &CommitArgs) -> Result<ChromiumCommit<'h>> {
    ChromiumCommit::new(host, args.sha.as_deref(), args.position.as_deref())
        .context("failed to identify commit")
}

fn write_summary(out: &mut dyn Write, summary: &CommitSummary) -> Result<()> {
    writeln!(out, "commit {}", summary.sha)?;
    if let Some(ref position) = summary.position {
        writeln!(out, "position {position}")?;
    }
    writeln!(
        out,
        "behind origin/master: {}",
        summary.commits_behind_master
    )?;
    writeln!(out)?;
    writeln!(out, "    {}", summary.subject)?;
    if !summary.body.is_empty() {
        writeln!(out)?;
        for line in summary.body.lines() {
            if line.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}
