//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_logger;
pub mod content_mutator;
pub mod contributor_pool;
pub mod notifier;
pub mod store;
pub mod subject_repository;
pub mod vote_repository;
