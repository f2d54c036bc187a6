//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use clap::Parser;
use std::io;
use std::process::ExitCode;
use toyen::{ErrorSet, cli::Cli, runner};
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .without_time()
        .init();
    match runner::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(set) = err.downcast_ref::<ErrorSet>() {
                for error in set.errors() {
                    tracing::error!("{error}");
                }
            } else {
                tracing::error!(error = %format!("{err:#}"), "generation failed");
            }
            ExitCode::FAILURE
        }
    }
}
