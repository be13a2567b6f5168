//! CLI entry for ejsfix, defining clap subcommands and dispatching each command handler.

use clap::{Parser, Subcommand};

use crate::{command, error::PatchError};

// The Cli struct represents the root of the command line interface.
#[derive(Parser, Debug)]
#[command(
    about = "ejsfix: repair EJS output tags broken across lines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// subcommand's execute and args are defined in `command` module
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Rewrite broken tags in a template, in place")]
    Patch(command::patch::PatchArgs),
    #[command(about = "Report broken tags without modifying the template")]
    Check(command::check::CheckArgs),
}

/// Parses the command line and executes the corresponding command.
/// - `args`: parse from command line if it's `None`, otherwise parse from the given args
pub fn parse(args: Option<&[&str]>) -> Result<(), PatchError> {
    let args = match args {
        Some(args) => {
            Cli::try_parse_from(args).map_err(|e| PatchError::InvalidArgument(e.to_string()))?
        }
        None => Cli::parse(),
    };
    match args.command {
        Commands::Patch(args) => command::patch::execute(args),
        Commands::Check(args) => command::check::execute(args),
    }
}

/// this test is to verify that the CLI can be built without panicking
/// according [clap dock](https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html)
#[test]
fn verify_cli() {
    use clap::CommandFactory;

    Cli::command().debug_assert()
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    let err = parse(Some(&["ejsfix", "frobnicate"])).unwrap_err();
    assert!(matches!(err, PatchError::InvalidArgument(_)));
}
