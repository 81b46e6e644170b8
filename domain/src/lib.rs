//! Domain layer for community-governance
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Subject
//!
//! A piece of proposed content (post, enrichment, contribution) that the
//! community reviews before it becomes visible.
//!
//! ## Quorum
//!
//! Peer votes are counted against thresholds derived from the size of the
//! eligible contributor pool:
//!
//! - **Required approvals**: a strict majority of the pool
//! - **Required participation**: half the pool, rounded up, before the author
//!   may ask for a manual publish

pub mod config;
pub mod core;
pub mod quorum;
pub mod subject;

// Re-export commonly used types
pub use config::{GovernancePolicy, OutputFormat, TieBreak};
pub use core::{
    error::DomainError,
    ids::{CommunityId, SubjectId, UserId},
};
pub use subject::{Subject, SubjectKind, SubjectStatus};

// Re-export quorum types
pub use quorum::{
    Decision, DecisionReason, QuorumThresholds, Verdict, Vote, VoteDecision, VoteTally,
    rejection_feedback, required_approvals, required_participation,
};
