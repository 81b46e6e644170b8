//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
mod policy;

pub use output_format::OutputFormat;
pub use policy::{GovernancePolicy, TieBreak};
