//! Subcommand implementations.

pub mod enums;
pub mod init;
pub mod list;
pub mod output;
pub mod prune;
pub mod replace;
