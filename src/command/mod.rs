//! Subcommand implementations; each module exposes its clap args and an `execute` entry.

pub mod check;
pub mod patch;
