//! Governance engine
//!
//! The state machine that decides, from a stream of peer votes, whether a
//! subject becomes visible, goes back for rework, or stays pending.
//!
//! # Flow
//!
//! ```text
//! submit_vote / update_vote
//!        │   (per-subject guard held)
//!        ├─ preconditions (self-review, closed, eligibility, duplicate)
//!        ├─ vote write
//!        ├─ recount ──> Decision
//!        │     └─ verdict? ──> CAS PENDING → terminal ──> ContentMutator
//!        ├─ recount failed? ──> vote write reverted, error returned
//!        │   (guard released)
//!        └─ Notifier (best-effort)
//! ```
//!
//! The compare-and-swap on the status is what makes the transition happen
//! exactly once, even if the same vote event is recounted twice.

mod locks;
mod publish;
mod recount;
mod rework;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use locks::{SubjectGuard, SubjectLocks};
pub use types::{CastVoteInput, GovernanceError, PublishOutcome, Recount, VoteOutcome};

use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::content_mutator::ContentMutator;
use crate::ports::contributor_pool::ContributorPool;
use crate::ports::notifier::{GovernanceNotifier, NoNotifier};
use crate::ports::store::StoreError;
use crate::ports::subject_repository::SubjectRepository;
use crate::ports::vote_repository::VoteRepository;
use governance_domain::{GovernancePolicy, Subject, SubjectId, Vote};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Use case for peer-reviewing subjects
pub struct GovernanceEngine {
    pub(super) subjects: Arc<dyn SubjectRepository>,
    pub(super) votes: Arc<dyn VoteRepository>,
    pub(super) pool: Arc<dyn ContributorPool>,
    pub(super) mutator: Arc<dyn ContentMutator>,
    pub(super) notifier: Arc<dyn GovernanceNotifier>,
    pub(super) audit: Arc<dyn AuditLogger>,
    pub(super) policy: GovernancePolicy,
    pub(super) locks: SubjectLocks,
}

impl GovernanceEngine {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        votes: Arc<dyn VoteRepository>,
        pool: Arc<dyn ContributorPool>,
        mutator: Arc<dyn ContentMutator>,
    ) -> Self {
        Self {
            subjects,
            votes,
            pool,
            mutator,
            notifier: Arc::new(NoNotifier),
            audit: Arc::new(NoAuditLogger),
            policy: GovernancePolicy::default(),
            locks: SubjectLocks::new(),
        }
    }

    /// Set the notifier that receives decision and vote events
    pub fn with_notifier(mut self, notifier: Arc<dyn GovernanceNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set the audit logger
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_policy(mut self, policy: GovernancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &GovernancePolicy {
        &self.policy
    }

    /// Cast a first-time vote on a pending subject.
    ///
    /// Fails with `DuplicateVote` if the reviewer already voted; use
    /// [`update_vote`](Self::update_vote) to change an existing vote.
    pub async fn submit_vote(&self, input: CastVoteInput) -> Result<VoteOutcome, GovernanceError> {
        let (outcome, votes) = {
            let _guard = self.locks.acquire(&input.subject_id).await;
            let subject = self.load_subject(&input.subject_id).await?;

            if subject.is_authored_by(&input.reviewer_id) {
                return Err(GovernanceError::SelfReview);
            }
            if !subject.is_open() {
                return Err(GovernanceError::SubjectClosed {
                    status: subject.status,
                });
            }
            if !self
                .pool
                .is_eligible(&subject.community_id, &input.reviewer_id)
                .await?
            {
                return Err(GovernanceError::NotEligible);
            }
            if self
                .votes
                .find_vote(&subject.id, &input.reviewer_id)
                .await?
                .is_some()
            {
                return Err(GovernanceError::DuplicateVote);
            }

            let vote = Vote::new(
                subject.id.clone(),
                input.reviewer_id,
                input.decision,
                input.content,
            );
            self.votes
                .insert_vote(vote.clone())
                .await
                .map_err(|e| match e {
                    StoreError::Conflict(_) => GovernanceError::DuplicateVote,
                    other => GovernanceError::Store(other),
                })?;

            debug!(subject = %subject.id, reviewer = %vote.reviewer_id, decision = %vote.decision, "Vote recorded");
            self.audit.log(AuditEvent::new(
                "vote_submitted",
                json!({
                    "subject": subject.id,
                    "reviewer": vote.reviewer_id,
                    "decision": vote.decision,
                }),
            ));

            match self.recount_locked(subject, vote.clone()).await {
                Ok(recounted) => recounted,
                Err(e) => {
                    self.revert_vote(&vote, None).await;
                    return Err(e);
                }
            }
        };

        self.dispatch(&outcome, &votes).await;
        Ok(outcome)
    }

    /// Overwrite an existing vote (decision, justification, timestamp).
    ///
    /// The number of votes does not change; the recount reflects the new
    /// decision.
    pub async fn update_vote(&self, input: CastVoteInput) -> Result<VoteOutcome, GovernanceError> {
        let (outcome, votes) = {
            let _guard = self.locks.acquire(&input.subject_id).await;
            let subject = self.load_subject(&input.subject_id).await?;

            let Some(mut vote) = self
                .votes
                .find_vote(&subject.id, &input.reviewer_id)
                .await?
            else {
                return Err(GovernanceError::VoteNotFound);
            };
            if !subject.is_open() {
                return Err(GovernanceError::SubjectClosed {
                    status: subject.status,
                });
            }

            let before = vote.clone();
            let previous = vote.decision;
            vote.revise(input.decision, input.content);
            self.votes
                .update_vote(vote.clone())
                .await
                .map_err(|e| match e {
                    StoreError::NotFound(_) => GovernanceError::VoteNotFound,
                    other => GovernanceError::Store(other),
                })?;

            debug!(subject = %subject.id, reviewer = %vote.reviewer_id, from = %previous, to = %vote.decision, "Vote updated");
            self.audit.log(AuditEvent::new(
                "vote_updated",
                json!({
                    "subject": subject.id,
                    "reviewer": vote.reviewer_id,
                    "previous": previous,
                    "decision": vote.decision,
                }),
            ));

            match self.recount_locked(subject, vote.clone()).await {
                Ok(recounted) => recounted,
                Err(e) => {
                    self.revert_vote(&vote, Some(before)).await;
                    return Err(e);
                }
            }
        };

        self.dispatch(&outcome, &votes).await;
        Ok(outcome)
    }

    /// Recount a subject and build the outcome for `vote`.
    ///
    /// Caller must hold the subject's guard.
    async fn recount_locked(
        &self,
        subject: Subject,
        vote: Vote,
    ) -> Result<(VoteOutcome, Vec<Vote>), GovernanceError> {
        let recount = self.recount(&subject).await?;

        let subject = match recount.decision.verdict {
            Some(verdict) if recount.transitioned => {
                info!(
                    subject = %subject.id,
                    kind = %subject.kind,
                    verdict = %verdict,
                    approved = recount.decision.tally.approved,
                    rejected = recount.decision.tally.rejected,
                    contributors = recount.decision.thresholds.contributors_count,
                    "Subject decided"
                );
                subject.with_status(verdict.as_status())
            }
            _ => subject,
        };

        let outcome = VoteOutcome {
            vote,
            subject,
            decision: recount.decision,
            transitioned: recount.transitioned,
        };
        Ok((outcome, recount.votes))
    }

    /// Undo a vote write whose recount failed, so a retry starts from the
    /// state before the call. `previous` is the vote an update overwrote.
    ///
    /// Caller must hold the subject's guard.
    async fn revert_vote(&self, written: &Vote, previous: Option<Vote>) {
        let result = match previous {
            Some(previous) => self.votes.update_vote(previous).await,
            None => {
                self.votes
                    .delete_vote(&written.subject_id, &written.reviewer_id)
                    .await
            }
        };

        match result {
            Ok(()) => {
                warn!(subject = %written.subject_id, reviewer = %written.reviewer_id, "Recount failed, vote write reverted");
                self.audit.log(AuditEvent::new(
                    "vote_reverted",
                    json!({
                        "subject": written.subject_id,
                        "reviewer": written.reviewer_id,
                    }),
                ));
            }
            Err(e) => {
                error!(subject = %written.subject_id, reviewer = %written.reviewer_id, "Could not revert vote write: {}", e);
            }
        }
    }

    pub(super) async fn load_subject(&self, id: &SubjectId) -> Result<Subject, GovernanceError> {
        self.subjects
            .load_subject(id)
            .await?
            .ok_or_else(|| GovernanceError::SubjectNotFound(id.clone()))
    }
}
