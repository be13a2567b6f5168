//! Optional `ejsfix.toml` settings; command line flags take precedence over these.

use std::{fs, io, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{
    error::{PatchError, Result},
    internal::rules::RuleSet,
    utils::path,
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template patched when no target is given on the command line.
    pub target: Option<PathBuf>,
    pub rules: RuleSet,
    /// Copy the target to `<target>.bak` before writing.
    pub backup: bool,
}

impl Config {
    /// Loads `explicit` if given, otherwise `ejsfix.toml` in the working directory.
    ///
    /// A missing default file yields the default config; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (file, required) = match explicit {
            Some(file) => (file.to_path_buf(), true),
            None => (path::config(), false),
        };
        match fs::read_to_string(&file) {
            Ok(text) => {
                tracing::debug!("loading config from {}", file.display());
                Self::parse(&text)
                    .map_err(|e| PatchError::Config(format!("{}: {e}", file.display())))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(PatchError::Config(format!("{}: {e}", file.display()))),
        }
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Target from the command line, then from the config, then the built-in default.
    pub fn resolve_target(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.target.clone())
            .unwrap_or_else(path::default_target)
    }
}
