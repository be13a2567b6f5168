//! Library half of `ejsfix`: rule sets that collapse EJS output tags broken across lines,
//! an atomic in-place file patcher, and a read-only scanner for the same defects.

pub mod cli;
pub mod command;
pub mod error;
pub mod internal;
pub mod utils;
