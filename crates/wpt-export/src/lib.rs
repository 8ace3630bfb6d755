//! wpt-export library
//!
//! This module exports the configuration and command dispatch of the
//! wpt-export binary for use in integration tests and as a library.

pub mod commands;
pub mod config;

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::debug;
use wpt_export_git::SystemHost;

use config::Config;

/// Validate `config`, discover the checkout and run its command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no Chromium checkout
/// contains the checkout path, or the command fails.
pub fn run(config: &Config, out: &mut dyn Write) -> Result<()> {
    config.validate()?;

    let Some(ref command) = config.command else {
        bail!("no command given");
    };

    let checkout = config
        .checkout_path()
        .context("cannot determine the current directory")?;
    let host = SystemHost::discover(&checkout)
        .with_context(|| format!("no Chromium checkout at {}", checkout.display()))?;
    debug!(
        chromium_base = %host.webkit_finder().chromium_base().display(),
        "Using checkout"
    );

    commands::run(command, &host, out)
}
