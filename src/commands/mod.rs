//! Subcommand implementations

pub mod tree;
pub mod tui;
