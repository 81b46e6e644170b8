//! Inputs, outcomes and errors of the governance engine

use crate::ports::store::StoreError;
use governance_domain::{
    Decision, DomainError, Subject, SubjectId, SubjectStatus, UserId, Vote, VoteDecision,
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by governance operations.
///
/// Every precondition failure has its own variant and message so callers
/// can react precisely ("edit your vote" vs "not authorized").
#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Authors cannot review their own submission")]
    SelfReview,

    #[error("Only contributors or the creator of this community can vote")]
    NotEligible,

    #[error("Voting is closed for this subject (status {status})")]
    SubjectClosed { status: SubjectStatus },

    #[error("You have already voted on this subject; update your vote instead")]
    DuplicateVote,

    #[error("No vote to update; submit a vote first")]
    VoteNotFound,

    #[error("Only the author can do this")]
    NotAuthor,

    #[error("Only posts can be published manually (subject is {kind})")]
    NotPublishable { kind: &'static str },

    #[error(
        "Not enough votes to publish: {current_votes} of {required_votes} required \
         ({contributors_count} contributors)"
    )]
    InsufficientParticipation {
        contributors_count: usize,
        required_votes: usize,
        current_votes: usize,
    },

    #[error(
        "Not enough approvals to publish: {current_votes} of {required_votes} required \
         ({contributors_count} contributors)"
    )]
    InsufficientApprovals {
        contributors_count: usize,
        required_votes: usize,
        current_votes: usize,
        is_contributors_count_even: bool,
    },

    #[error("Subject not found: {0}")]
    SubjectNotFound(SubjectId),

    #[error("Cannot rework subject: {0}")]
    InvalidRework(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl GovernanceError {
    /// Errors that will not go away by retrying the same call
    pub fn is_permanent(&self) -> bool {
        !matches!(self, GovernanceError::Store(e) if e.is_transient())
            && !self.is_recoverable_by_caller()
    }

    /// Errors fixed by switching between submit and update
    pub fn is_recoverable_by_caller(&self) -> bool {
        matches!(
            self,
            GovernanceError::DuplicateVote | GovernanceError::VoteNotFound
        )
    }

    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            GovernanceError::SelfReview => "self_review",
            GovernanceError::NotEligible => "not_eligible",
            GovernanceError::SubjectClosed { .. } => "subject_closed",
            GovernanceError::DuplicateVote => "duplicate_vote",
            GovernanceError::VoteNotFound => "vote_not_found",
            GovernanceError::NotAuthor => "not_author",
            GovernanceError::NotPublishable { .. } => "not_publishable",
            GovernanceError::InsufficientParticipation { .. } => "insufficient_participation",
            GovernanceError::InsufficientApprovals { .. } => "insufficient_approvals",
            GovernanceError::SubjectNotFound(_) => "subject_not_found",
            GovernanceError::InvalidRework(_) => "invalid_rework",
            GovernanceError::Store(_) => "store",
        }
    }
}

/// Input for `submit_vote` and `update_vote`
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub subject_id: SubjectId,
    pub reviewer_id: UserId,
    pub decision: VoteDecision,
    /// Justification shown to the author
    pub content: String,
}

impl CastVoteInput {
    pub fn new(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        decision: VoteDecision,
        content: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            reviewer_id: reviewer_id.into(),
            decision,
            content: content.into(),
        }
    }

    pub fn approve(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(subject_id, reviewer_id, VoteDecision::Approved, content)
    }

    pub fn reject(
        subject_id: impl Into<SubjectId>,
        reviewer_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(subject_id, reviewer_id, VoteDecision::Rejected, content)
    }
}

/// Result of recounting a subject's votes
#[derive(Debug, Clone, Serialize)]
pub struct Recount {
    pub decision: Decision,
    /// All live votes at the time of the recount
    pub votes: Vec<Vote>,
    /// Whether this recount performed the terminal transition
    pub transitioned: bool,
}

/// Outcome of a successful vote write
#[derive(Debug, Clone, Serialize)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// Subject as it stands after the recount
    pub subject: Subject,
    pub decision: Decision,
    pub transitioned: bool,
}

impl VoteOutcome {
    pub fn should_update(&self) -> bool {
        self.decision.should_update()
    }
}

/// Outcome of a successful manual publish
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub subject: Subject,
    pub decision: Decision,
}
