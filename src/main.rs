//! This is the main entry point for ejsfix.

use std::process::ExitCode;

use colored::Colorize;
use ejsfix::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries the status line, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli::parse(None) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("fatal: {e}").red());
            ExitCode::FAILURE
        }
    }
}
