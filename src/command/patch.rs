//! Implements `patch` to rewrite broken EJS output tags in a template, in place.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use crate::{
    error::Result,
    internal::{
        config::Config,
        patcher::{self, PatchOptions, PatchReport},
        rules::RuleSet,
        scan,
    },
};

/// Samples shown for leftover split strings.
const MAX_SAMPLES: usize = 5;
const SAMPLE_WIDTH: usize = 60;

#[derive(Parser, Debug, Clone, Default)]
pub struct PatchArgs {
    /// Template to patch [default: views/individualUser/dashboard.ejs]
    pub target: Option<PathBuf>,
    /// Apply every known repair, not only the 'over budget' one
    #[clap(short, long)]
    pub all: bool,
    /// Read the template from this file (e.g. a .bak copy) and write the result to the target
    #[clap(long, value_name = "SOURCE")]
    pub from: Option<PathBuf>,
    /// Copy the target to <target>.bak before writing
    #[clap(short, long)]
    pub backup: bool,
    /// Show what would change without writing
    #[clap(short = 'n', long)]
    pub dry_run: bool,
    /// Configuration file [default: ejsfix.toml]
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn execute(args: PatchArgs) -> Result<()> {
    tracing::debug!("`patch` args: {:?}", args);
    let config = Config::load(args.config.as_deref())?;
    let rules = if args.all { RuleSet::All } else { config.rules };
    let target = config.resolve_target(args.target);
    let options = PatchOptions {
        rules,
        source: args.from,
        backup: args.backup || config.backup,
        dry_run: args.dry_run,
    };

    let report = patcher::patch_file(&target, &options)?;
    print_report(&report, rules);
    Ok(())
}

fn print_report(report: &PatchReport, rules: RuleSet) {
    if report.written {
        println!("{}", rules.completion_message(&report.target));
    } else {
        for hit in report.hits.iter().filter(|h| h.changed > 0) {
            println!("Would fix {} occurrence(s) of {}", hit.changed, hit.rule);
        }
        println!("{}", dry_run_summary(report));
    }

    if report.split_strings.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!(
            "warning: found {} potential multi-line string(s)",
            report.split_strings.len()
        )
        .yellow()
    );
    for (i, sample) in report.split_strings.iter().take(MAX_SAMPLES).enumerate() {
        eprintln!("  {}: {}", i + 1, scan::preview(sample, SAMPLE_WIDTH));
    }
}

fn dry_run_summary(report: &PatchReport) -> String {
    format!(
        "Would rewrite {} ({} change(s), {} -> {} bytes)",
        report.target.display(),
        report.changed(),
        report.original_len,
        report.patched_len
    )
}
