//! Internal layer exports for configuration, substitution rules, the file patcher, and the scanner.

pub mod config;
pub mod patcher;
pub mod rules;
pub mod scan;
