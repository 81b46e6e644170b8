//! Application layer for community-governance
//!
//! This crate contains the governance engine and the port definitions its
//! adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    content_mutator::{ContentMutator, NoContentMutation},
    contributor_pool::ContributorPool,
    notifier::{GovernanceEvent, GovernanceNotifier, NoNotifier, NotifyError},
    store::StoreError,
    subject_repository::SubjectRepository,
    vote_repository::VoteRepository,
};
pub use use_cases::govern::{
    CastVoteInput, GovernanceEngine, GovernanceError, PublishOutcome, Recount, SubjectLocks,
    VoteOutcome,
};
