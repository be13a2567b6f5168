//! Implements `check` to report EJS output tags broken across lines without modifying anything.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use crate::{
    error::{PatchError, Result},
    internal::{config::Config, scan},
    utils::fs,
};

const SAMPLE_WIDTH: usize = 80;

#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Template to scan [default: views/individualUser/dashboard.ejs]
    pub target: Option<PathBuf>,
    /// Configuration file [default: ejsfix.toml]
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Fails with [`PatchError::IssuesFound`] when anything suspicious is reported.
pub fn execute(args: CheckArgs) -> Result<()> {
    tracing::debug!("`check` args: {:?}", args);
    let config = Config::load(args.config.as_deref())?;
    let target = config.resolve_target(args.target);
    let content = fs::read_text(&target)?;

    let findings = scan::find_suspicious(&content);
    let mut count = 0;
    for finding in &findings {
        println!(
            "{} Found {} instance(s) of: {}",
            "✗".red(),
            finding.samples.len(),
            finding.name
        );
        for (i, sample) in finding.samples.iter().enumerate() {
            println!("  {}. {}", i + 1, scan::preview(sample, SAMPLE_WIDTH));
        }
        count += finding.samples.len();
    }

    // the named patterns miss some shapes; fall back to pairing lines
    if findings.is_empty() {
        for tag in scan::spanning_tags(&content) {
            println!(
                "  Lines {}-{}: multi-line <%= tag found",
                tag.start_line, tag.end_line
            );
            count += 1;
        }
    }

    if count == 0 {
        println!("{} No multi-line EJS issues found", "✓".green());
        return Ok(());
    }
    Err(PatchError::IssuesFound {
        path: target,
        count,
    })
}
