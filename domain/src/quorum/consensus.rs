//! Decision rule
//!
//! Turns a [`VoteTally`] and the subject's [`QuorumThresholds`] into an
//! optional [`Verdict`].

use super::rule::QuorumThresholds;
use super::vote::VoteTally;
use crate::config::TieBreak;
use crate::subject::SubjectStatus;
use serde::{Deserialize, Serialize};

/// Outcome of a governance decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    /// The terminal status a subject moves to on this verdict
    pub fn as_status(&self) -> SubjectStatus {
        match self {
            Verdict::Approved => SubjectStatus::Approved,
            Verdict::Rejected => SubjectStatus::Rejected,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_status().as_str())
    }
}

/// Which branch of the decision rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Approvals reached the strict-majority threshold
    ApprovalQuorum,
    /// Rejections reached the strict-majority threshold
    RejectionQuorum,
    /// Everyone voted and one side has strictly more votes
    FullParticipation,
    /// Everyone voted and the sides are equal
    TieBreak,
    /// Not enough votes yet
    Undecided,
    /// The pool is empty, no automatic verdict is possible
    NoEligibleReviewers,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::ApprovalQuorum => "approval quorum reached",
            DecisionReason::RejectionQuorum => "rejection quorum reached",
            DecisionReason::FullParticipation => "all contributors voted",
            DecisionReason::TieBreak => "all contributors voted, tie broken by policy",
            DecisionReason::Undecided => "awaiting more votes",
            DecisionReason::NoEligibleReviewers => "no eligible reviewers",
        }
    }
}

/// Result of evaluating the decision rule once
///
/// # Example
///
/// ```
/// use governance_domain::config::TieBreak;
/// use governance_domain::quorum::{Decision, QuorumThresholds, Verdict, VoteTally};
///
/// let thresholds = QuorumThresholds::for_pool(4);
/// let tally = VoteTally { approved: 3, rejected: 0 };
/// let decision = Decision::evaluate(tally, thresholds, TieBreak::Reject);
/// assert_eq!(decision.verdict, Some(Verdict::Approved));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub tally: VoteTally,
    pub thresholds: QuorumThresholds,
    pub verdict: Option<Verdict>,
    pub reason: DecisionReason,
}

impl Decision {
    /// Evaluate the decision rule, first matching branch wins
    pub fn evaluate(tally: VoteTally, thresholds: QuorumThresholds, tie_break: TieBreak) -> Self {
        let (verdict, reason) = Self::rule(&tally, &thresholds, tie_break);
        Self {
            tally,
            thresholds,
            verdict,
            reason,
        }
    }

    fn rule(
        tally: &VoteTally,
        thresholds: &QuorumThresholds,
        tie_break: TieBreak,
    ) -> (Option<Verdict>, DecisionReason) {
        if !thresholds.is_reachable() {
            return (None, DecisionReason::NoEligibleReviewers);
        }

        let required = thresholds.required_approvals;
        if tally.approved >= required {
            return (Some(Verdict::Approved), DecisionReason::ApprovalQuorum);
        }
        if tally.rejected >= required {
            return (Some(Verdict::Rejected), DecisionReason::RejectionQuorum);
        }
        if tally.total() == thresholds.contributors_count {
            return if tally.approved > tally.rejected {
                (Some(Verdict::Approved), DecisionReason::FullParticipation)
            } else if tally.rejected > tally.approved {
                (Some(Verdict::Rejected), DecisionReason::FullParticipation)
            } else {
                (Some(tie_break.verdict()), DecisionReason::TieBreak)
            };
        }

        (None, DecisionReason::Undecided)
    }

    /// Whether the subject's status must change
    pub fn should_update(&self) -> bool {
        self.verdict.is_some()
    }

    /// Votes still needed on the approving side before acceptance
    pub fn approvals_missing(&self) -> usize {
        self.thresholds.approvals_missing(self.tally.approved)
    }
}
