//! wpt-export: inspect Chromium commits for web-platform-tests export
//!
//! This binary crate answers questions about a single Chromium commit
//! (message, mainline distance, WPT-only patch) by running git in the
//! enclosing checkout.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use wpt_export::config::Config;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match wpt_export::run(&config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
