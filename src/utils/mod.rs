//! Utilities module aggregator exposing path defaults and file I/O helpers.

pub mod fs;
pub mod path;
