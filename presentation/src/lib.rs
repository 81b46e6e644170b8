//! Presentation layer for community-governance
//!
//! This crate contains the CLI definition and output formatters for
//! vote outcomes, notifications and quorum tables.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
