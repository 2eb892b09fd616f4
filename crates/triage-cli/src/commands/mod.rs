//! Subcommand implementations.

pub mod posts;
pub mod serve;
