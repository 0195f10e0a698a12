//! CLI subcommand implementations.

pub mod club;
pub mod detail;
