//! CLI subcommand implementations.

pub mod categories;
pub mod check;
