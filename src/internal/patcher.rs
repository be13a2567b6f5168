//! Reads a template, runs a rule set over it, and atomically writes the result back.

use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    internal::{
        rules::{self, RuleHit, RuleSet},
        scan,
    },
    utils::{fs, path},
};

/// Options for a single patch run.
#[derive(Debug, Clone, Default)]
pub struct PatchOptions {
    pub rules: RuleSet,
    /// Read from this file instead of the target; the target is still the one written.
    pub source: Option<PathBuf>,
    /// Copy an existing target to `<target>.bak` before replacing it.
    pub backup: bool,
    /// Report only, write nothing.
    pub dry_run: bool,
}

/// Outcome of [`patch_file`].
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub target: PathBuf,
    pub hits: Vec<RuleHit>,
    pub original_len: usize,
    pub patched_len: usize,
    /// Quoted literals still containing a line break after patching.
    pub split_strings: Vec<String>,
    pub backup: Option<PathBuf>,
    pub written: bool,
}

impl PatchReport {
    pub fn changed(&self) -> usize {
        self.hits.iter().map(|h| h.changed).sum()
    }
}

/// Patches `target` in place.
///
/// The source (the target itself unless [`PatchOptions::source`] is set) is read and decoded
/// before anything is written, so a missing or undecodable file leaves the filesystem as it
/// was. The target is rewritten even when no rule changed anything.
pub fn patch_file(target: &Path, options: &PatchOptions) -> Result<PatchReport> {
    let rules = options.rules.compile()?;
    let source = options.source.as_deref().unwrap_or(target);
    let content = fs::read_text(source)?;
    tracing::debug!("read {} bytes from {}", content.len(), source.display());

    let (patched, hits) = rules::apply_rules(&rules, &content);
    let split_strings: Vec<String> = scan::split_strings(&patched)
        .into_iter()
        .map(str::to_string)
        .collect();
    if !split_strings.is_empty() {
        tracing::debug!(
            "{} potential multi-line string(s) remain in {}",
            split_strings.len(),
            target.display()
        );
    }

    let mut report = PatchReport {
        target: target.to_path_buf(),
        hits,
        original_len: content.len(),
        patched_len: patched.len(),
        split_strings,
        backup: None,
        written: false,
    };
    if options.dry_run {
        return Ok(report);
    }

    if options.backup && target.exists() {
        let backup = path::backup(target);
        fs::copy(target, &backup)?;
        report.backup = Some(backup);
    }
    fs::write_atomic(target, &patched)?;
    report.written = true;
    tracing::debug!("wrote {} bytes to {}", patched.len(), target.display());
    Ok(report)
}
