//! Configuration for the wpt-export command line
//!
//! This module provides the clap-derived [`Config`], the subcommands it
//! dispatches to, and helpers for the checkout location and log level.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect Chromium commits for web-platform-tests export
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "wpt-export")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Config {
    /// Query to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path inside the Chromium checkout
    ///
    /// The checkout root is found by walking up to the enclosing git
    /// repository, which must contain third_party/WebKit.
    /// Defaults to the current working directory.
    #[arg(short = 'C', long, env = "WPT_EXPORT_CHECKOUT", global = true)]
    pub checkout: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every git invocation. Logs are written to stderr so command
    /// output on stdout stays machine readable.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,
}

/// Selects the commit a query applies to
///
/// Exactly one of the SHA or the commit position must be given.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitArgs {
    /// Commit SHA
    pub sha: Option<String>,

    /// Commit position, e.g. "refs/heads/master@{#431915}"
    ///
    /// A leading "Cr-Commit-Position: " label is accepted and ignored.
    #[arg(short, long)]
    pub position: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print SHA, position, subject, body and distance from origin/master
    Show {
        #[command(flatten)]
        commit: CommitArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the commit subject
    Subject {
        #[command(flatten)]
        commit: CommitArgs,
    },
    /// Print the commit body (message without the subject)
    Body {
        #[command(flatten)]
        commit: CommitArgs,
    },
    /// Print the full commit message
    Message {
        #[command(flatten)]
        commit: CommitArgs,
    },
    /// Print a patch of the commit limited to the imported WPT directory
    Patch {
        #[command(flatten)]
        commit: CommitArgs,
    },
    /// Print how many origin/master commits the commit does not contain
    Behind {
        #[command(flatten)]
        commit: CommitArgs,
    },
    /// Resolve a commit position to a SHA
    Resolve {
        /// Commit position, with or without the "Cr-Commit-Position: " label
        position: String,
    },
    /// Print the absolute path of the imported WPT directory
    WptDir,
}

impl Config {
    /// Get the checkout path, using current directory as default
    ///
    /// Returns `None` if no checkout is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn checkout_path(&self) -> Option<PathBuf> {
        self.checkout
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout path is specified but doesn't exist
    /// or is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref checkout) = self.checkout {
            if !checkout.exists() {
                return Err(ConfigError::CheckoutNotFound(checkout.clone()));
            }
            if !checkout.is_dir() {
                return Err(ConfigError::CheckoutNotDirectory(checkout.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Checkout path not found
    #[error("Checkout path not found: {0}")]
    CheckoutNotFound(PathBuf),

    /// Checkout path is not a directory
    #[error("Checkout path is not a directory: {0}")]
    CheckoutNotDirectory(PathBuf),
}
