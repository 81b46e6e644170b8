//! Vote recount and the terminal transition

use super::{GovernanceEngine, GovernanceError, Recount, VoteOutcome};
use crate::ports::audit_logger::AuditEvent;
use governance_domain::{
    Decision, QuorumThresholds, Subject, SubjectId, SubjectStatus, Verdict, Vote, VoteTally,
};
use serde_json::json;
use tracing::{debug, error, warn};

impl GovernanceEngine {
    /// Recount all votes of `subject` and apply the verdict, if any.
    ///
    /// Caller must hold the subject's guard. The transition itself is a
    /// compare-and-swap from `PENDING`, so recounting an already decided
    /// subject is a no-op for side effects.
    pub(super) async fn recount(&self, subject: &Subject) -> Result<Recount, GovernanceError> {
        let votes = self.votes.list_votes(&subject.id).await?;
        let decision = self.evaluate(subject, &votes).await?;

        let transitioned = match decision.verdict {
            Some(verdict) if subject.is_open() => {
                self.transition(subject, verdict, &decision).await?
            }
            _ => false,
        };

        Ok(Recount {
            decision,
            votes,
            transitioned,
        })
    }

    /// Evaluate the decision rule for `subject` over `votes` without writing
    pub(super) async fn evaluate(
        &self,
        subject: &Subject,
        votes: &[Vote],
    ) -> Result<Decision, GovernanceError> {
        let contributors = self
            .pool
            .eligible_count(&subject.community_id, &subject.author_id)
            .await?;

        Ok(Decision::evaluate(
            VoteTally::from_votes(votes),
            QuorumThresholds::for_pool(contributors),
            self.policy.tie_break,
        ))
    }

    /// Move `subject` from `PENDING` to the verdict's status and apply the
    /// content side effect. Returns `false` if another writer already moved it.
    pub(super) async fn transition(
        &self,
        subject: &Subject,
        verdict: Verdict,
        decision: &Decision,
    ) -> Result<bool, GovernanceError> {
        let swapped = self
            .subjects
            .compare_and_set_status(&subject.id, SubjectStatus::Pending, verdict.as_status())
            .await?;
        if !swapped {
            debug!(subject = %subject.id, "Subject already left PENDING, skipping side effects");
            return Ok(false);
        }

        self.audit.log(AuditEvent::new(
            "verdict_reached",
            json!({
                "subject": subject.id,
                "kind": subject.kind.as_str(),
                "verdict": verdict,
                "reason": decision.reason,
                "approved": decision.tally.approved,
                "rejected": decision.tally.rejected,
                "contributors": decision.thresholds.contributors_count,
            }),
        ));

        // The status is durable at this point; a failed mutation is reported
        // but does not undo the verdict.
        if let Err(e) = self.mutator.apply(subject, verdict).await {
            error!(subject = %subject.id, verdict = %verdict, "Content mutation failed: {}", e);
        }

        Ok(true)
    }

    /// Deliver notifications for a vote outcome. Runs after the subject's
    /// guard is released; failures are logged and swallowed.
    pub(super) async fn dispatch(&self, outcome: &VoteOutcome, votes: &[Vote]) {
        let result = match outcome.decision.verdict {
            Some(verdict) if outcome.transitioned => {
                self.notifier
                    .notify_decision(&outcome.subject, verdict, votes)
                    .await
            }
            None if self.policy.notify_vote_received => {
                self.notifier
                    .notify_vote_received(&outcome.subject, &outcome.vote)
                    .await
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            warn!(subject = %outcome.subject.id, "Notification failed: {}", e);
        }
    }

    /// Current tally and thresholds of a subject, without side effects
    pub async fn inspect(&self, subject_id: &SubjectId) -> Result<Decision, GovernanceError> {
        let subject = self.load_subject(subject_id).await?;
        let votes = self.votes.list_votes(subject_id).await?;
        self.evaluate(&subject, &votes).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CastVoteInput;
    use super::super::test_support::*;
    use governance_domain::{DecisionReason, SubjectId, SubjectStatus, Verdict, Vote, VoteDecision};

    #[tokio::test]
    async fn test_recount_twice_applies_side_effects_once() {
        let h = Harness::new(&["r1", "r2", "r3"]);
        h.add_post("p-1");
        // Votes written behind the engine's back, as a re-delivered event would find them
        h.votes.insert_for_test(Vote::approve("p-1", "r1", "ok"));
        h.votes.insert_for_test(Vote::approve("p-1", "r2", "ok"));

        let subject = h.subject("p-1");
        let first = h.engine.recount(&subject).await.unwrap();
        let second = h.engine.recount(&subject).await.unwrap();

        assert!(first.transitioned);
        assert!(!second.transitioned);
        assert_eq!(first.decision.verdict, Some(Verdict::Approved));
        assert_eq!(second.decision.verdict, Some(Verdict::Approved));
        assert_eq!(h.mutator.calls(), 1);
        assert_eq!(h.status("p-1"), SubjectStatus::Approved);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_verdict() {
        for (decision, status) in [
            (VoteDecision::Approved, SubjectStatus::Approved),
            (VoteDecision::Rejected, SubjectStatus::Rejected),
        ] {
            let h = Harness::new(&["r1", "r2"]);
            h.mutator.fail_all();
            h.add_post("p-1");

            h.engine
                .submit_vote(CastVoteInput::new("p-1", "r1", decision, "first"))
                .await
                .unwrap();
            let out = h
                .engine
                .submit_vote(CastVoteInput::new("p-1", "r2", decision, "second"))
                .await
                .unwrap();

            assert!(out.transitioned);
            assert_eq!(out.subject.status, status);
            assert_eq!(h.status("p-1"), status);
            assert_eq!(h.mutator.calls(), 1);
            assert_eq!(h.notifier.decisions(), 1);
            assert_eq!(h.vote_count("p-1"), 2);
        }
    }

    #[tokio::test]
    async fn test_empty_pool_stays_pending() {
        // Only the author is in the community
        let h = Harness::new(&[]);
        h.add_post("p-1");

        let decision = h.engine.inspect(&SubjectId::from("p-1")).await.unwrap();
        assert_eq!(decision.thresholds.contributors_count, 0);
        assert_eq!(decision.reason, DecisionReason::NoEligibleReviewers);

        let subject = h.subject("p-1");
        let recount = h.engine.recount(&subject).await.unwrap();
        assert!(!recount.transitioned);
        assert_eq!(h.status("p-1"), SubjectStatus::Pending);
    }

    #[tokio::test]
    async fn test_inspect_has_no_side_effects() {
        let h = Harness::new(&["r1"]);
        h.add_post("p-1");
        h.votes.insert_for_test(Vote::approve("p-1", "r1", "ok"));

        let decision = h.engine.inspect(&SubjectId::from("p-1")).await.unwrap();
        assert_eq!(decision.verdict, Some(Verdict::Approved));
        assert_eq!(h.status("p-1"), SubjectStatus::Pending);
        assert_eq!(h.mutator.calls(), 0);
    }

    #[tokio::test]
    async fn test_enrichment_uses_same_rules() {
        let h = Harness::new(&["r1", "r2"]);
        h.add(governance_domain::Subject::enrichment(
            "e-1", "p-1", COMMUNITY, AUTHOR, "revised",
        ));

        h.engine
            .submit_vote(CastVoteInput::approve("e-1", "r1", "ok"))
            .await
            .unwrap();
        let out = h
            .engine
            .submit_vote(CastVoteInput::approve("e-1", "r2", "ok"))
            .await
            .unwrap();
        assert_eq!(out.decision.verdict, Some(Verdict::Approved));
        assert_eq!(h.mutations(), vec![("e-1".to_string(), Verdict::Approved)]);
    }
}
