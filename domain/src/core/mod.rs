//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] - identifiers for users, communities and subjects
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod ids;
