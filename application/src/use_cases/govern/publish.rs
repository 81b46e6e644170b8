//! Manual publish path
//!
//! Some posts are published on the author's request rather than on every
//! vote write. The threshold arithmetic is the same as the automatic recount:
//! both read from `QuorumThresholds`.

use super::{GovernanceEngine, GovernanceError, PublishOutcome};
use crate::ports::audit_logger::AuditEvent;
use governance_domain::{SubjectId, UserId, Verdict};
use serde_json::json;
use tracing::{info, warn};

impl GovernanceEngine {
    /// Publish a pending post on its author's request.
    ///
    /// Requires enough participation and a strict majority of approvals among
    /// the eligible pool. On success the post is `APPROVED` and the content
    /// mutator and notifier run as for an automatic verdict.
    pub async fn attempt_publish(
        &self,
        subject_id: &SubjectId,
        requester_id: &UserId,
    ) -> Result<PublishOutcome, GovernanceError> {
        let (outcome, votes) = {
            let _guard = self.locks.acquire(subject_id).await;
            let subject = self.load_subject(subject_id).await?;

            if !subject.is_authored_by(requester_id) {
                return Err(GovernanceError::NotAuthor);
            }
            if !subject.kind.is_post() {
                return Err(GovernanceError::NotPublishable {
                    kind: subject.kind.as_str(),
                });
            }
            if !subject.is_open() {
                return Err(GovernanceError::SubjectClosed {
                    status: subject.status,
                });
            }

            let votes = self.votes.list_votes(subject_id).await?;
            let decision = self.evaluate(&subject, &votes).await?;
            let thresholds = decision.thresholds;
            let tally = decision.tally;

            self.audit.log(AuditEvent::new(
                "publish_attempted",
                json!({
                    "subject": subject.id,
                    "requester": requester_id,
                    "approved": tally.approved,
                    "total": tally.total(),
                    "contributors": thresholds.contributors_count,
                }),
            ));

            let bypass = !thresholds.is_reachable() && self.policy.empty_pool_publish;
            if !bypass {
                if tally.total() < thresholds.required_participation {
                    return Err(GovernanceError::InsufficientParticipation {
                        contributors_count: thresholds.contributors_count,
                        required_votes: thresholds.required_participation,
                        current_votes: tally.total(),
                    });
                }
                if tally.approved < thresholds.required_approvals {
                    return Err(GovernanceError::InsufficientApprovals {
                        contributors_count: thresholds.contributors_count,
                        required_votes: thresholds.required_approvals,
                        current_votes: tally.approved,
                        is_contributors_count_even: thresholds.is_even(),
                    });
                }
            } else {
                warn!(subject = %subject.id, "Publishing without reviewers: community has no eligible contributors");
            }

            if !self
                .transition(&subject, Verdict::Approved, &decision)
                .await?
            {
                // Lost a race against an automatic verdict
                let status = self.load_subject(subject_id).await?.status;
                return Err(GovernanceError::SubjectClosed { status });
            }
            info!(subject = %subject.id, approved = tally.approved, "Post published by author");

            let outcome = PublishOutcome {
                subject: subject.with_status(Verdict::Approved.as_status()),
                decision,
            };
            (outcome, votes)
        };

        if let Err(e) = self
            .notifier
            .notify_decision(&outcome.subject, Verdict::Approved, &votes)
            .await
        {
            warn!(subject = %outcome.subject.id, "Notification failed: {}", e);
        }

        Ok(outcome)
    }
}
