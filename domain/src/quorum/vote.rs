//! Vote types for Quorum consensus
//!
//! This module defines the core voting primitives: one reviewer's position on
//! one subject, and the aggregate counts the decision rule works on.

use crate::core::error::DomainError;
use crate::core::ids::{SubjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reviewer's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteDecision {
    Approved,
    Rejected,
}

impl VoteDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDecision::Approved => "APPROVED",
            VoteDecision::Rejected => "REJECTED",
        }
    }

    pub fn is_approval(&self) -> bool {
        matches!(self, VoteDecision::Approved)
    }
}

impl std::fmt::Display for VoteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approved" | "approve" => Ok(VoteDecision::Approved),
            "rejected" | "reject" => Ok(VoteDecision::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

/// A single reviewer's vote on a subject
///
/// `(subject_id, reviewer_id)` is the identity of a vote: a reviewer holds at
/// most one live vote per subject and edits it in place.
///
/// # Example
///
/// ```
/// use governance_domain::quorum::{Vote, VoteDecision};
///
/// let vote = Vote::approve("post-1", "bob", "Clear and well sourced.");
/// assert_eq!(vote.decision, VoteDecision::Approved);
///
/// let vote = Vote::reject("post-1", "carol", "Off-topic for this community.");
/// assert!(!vote.decision.is_approval());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub subject_id: SubjectId,
    pub reviewer_id: UserId,
    pub decision: VoteDecision,
    /// Free-text justification; never used in the arithmetic
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new vote
    pub fn new(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        decision: VoteDecision,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            subject_id: subject_id.into(),
            reviewer_id: reviewer_id.into(),
            decision,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an approval vote
    pub fn approve(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(subject_id, reviewer_id, VoteDecision::Approved, content)
    }

    /// Create a rejection vote
    pub fn reject(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(subject_id, reviewer_id, VoteDecision::Rejected, content)
    }

    /// Overwrite decision, justification and timestamp in place
    pub fn revise(&mut self, decision: VoteDecision, content: impl Into<String>) {
        self.decision = decision;
        self.content = content.into();
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn is_revised(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Aggregate counts over all live votes of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub approved: usize,
    pub rejected: usize,
}

impl VoteTally {
    pub fn from_votes(votes: &[Vote]) -> Self {
        let approved = votes.iter().filter(|v| v.decision.is_approval()).count();
        Self {
            approved,
            rejected: votes.len() - approved,
        }
    }

    pub fn total(&self) -> usize {
        self.approved + self.rejected
    }

    pub fn is_unanimous(&self) -> bool {
        self.total() > 0 && (self.approved == 0 || self.rejected == 0)
    }

    /// Visual vote summary, approvals first (e.g., "[●●○]")
    pub fn summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.approved));
        summary.extend(std::iter::repeat_n('○', self.rejected));
        summary.push(']');
        summary
    }
}

impl std::fmt::Display for VoteTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} approved / {} rejected", self.approved, self.rejected)
    }
}

/// Join the justifications of all rejecting votes into author feedback
pub fn rejection_feedback(votes: &[Vote]) -> String {
    votes
        .iter()
        .filter(|v| !v.decision.is_approval())
        .map(|v| format!("{}: {}", v.reviewer_id, v.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
