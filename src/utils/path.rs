//! Default locations used when the command line leaves a path out.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

pub const DEFAULT_TARGET: &str = "views/individualUser/dashboard.ejs";
pub const CONFIG_FILE: &str = "ejsfix.toml";

pub fn default_target() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET)
}

pub fn config() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// `dashboard.ejs` -> `dashboard.ejs.bak`
pub fn backup(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}
