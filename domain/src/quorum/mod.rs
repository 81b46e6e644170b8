//! Quorum consensus domain
//!
//! This module contains the arithmetic that turns a set of peer votes into a
//! verdict on a subject.
//!
//! # Core Concepts
//!
//! ## Quorum Thresholds
//! Derived from the size of the eligible contributor pool only. A strict
//! majority of the pool must agree before a verdict is rendered.
//!
//! ## Decision Rule
//! Evaluated after every vote write, in this order:
//!
//! ```text
//! approved >= required           → APPROVED
//! rejected >= required           → REJECTED
//! total    == contributors_count → larger side wins, ties per TieBreak
//! otherwise                      → no verdict (stays PENDING)
//! ```

pub mod consensus;
pub mod rule;
pub mod vote;

// Re-export main types
pub use consensus::{Decision, DecisionReason, Verdict};
pub use rule::{QuorumThresholds, required_approvals, required_participation};
pub use vote::{Vote, VoteDecision, VoteTally, rejection_feedback};
