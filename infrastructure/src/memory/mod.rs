//! In-memory store adapters
//!
//! Implementations of the persistence ports backed by process memory. They
//! enforce the same constraints a relational store would: one vote per
//! `(subject, reviewer)` and an atomic compare-and-swap on subject status.
//!
//! # Components
//!
//! - [`InMemorySubjectRepository`] - subjects with CAS status transitions
//! - [`InMemoryVoteRepository`] - votes keyed by `(subject, reviewer)`
//! - [`InMemoryContributorPool`] - community creators and contributors
//! - [`StoreContentMutator`] - applies verdicts to the subject store

mod mutator;
mod pool;
mod subjects;
mod votes;

pub use mutator::StoreContentMutator;
pub use pool::{Community, InMemoryContributorPool};
pub use subjects::InMemorySubjectRepository;
pub use votes::InMemoryVoteRepository;

use governance_application::StoreError;
use std::sync::PoisonError;

/// Map a poisoned lock to a store error instead of panicking
pub(crate) fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}
