//! Notifier that writes events to the `tracing` log

use async_trait::async_trait;
use governance_application::{GovernanceNotifier, NotifyError};
use governance_domain::{Subject, Verdict, Vote, rejection_feedback};
use tracing::info;

/// Logs every event at `info` level; never fails
pub struct TracingNotifier;

#[async_trait]
impl GovernanceNotifier for TracingNotifier {
    async fn notify_decision(
        &self,
        subject: &Subject,
        verdict: Verdict,
        votes: &[Vote],
    ) -> Result<(), NotifyError> {
        if verdict.is_approved() {
            info!(subject = %subject.id, author = %subject.author_id, votes = votes.len(), "Notify: {} approved", subject.kind);
        } else {
            info!(
                subject = %subject.id,
                author = %subject.author_id,
                feedback = %rejection_feedback(votes),
                "Notify: {} rejected",
                subject.kind
            );
        }
        Ok(())
    }

    async fn notify_vote_received(
        &self,
        subject: &Subject,
        vote: &Vote,
    ) -> Result<(), NotifyError> {
        info!(
            subject = %subject.id,
            author = %subject.author_id,
            reviewer = %vote.reviewer_id,
            decision = %vote.decision,
            "Notify: vote received"
        );
        Ok(())
    }
}
