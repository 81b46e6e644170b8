//! Notifier port
//!
//! Decision events are delivered after the vote and status writes are
//! durable. Delivery is best-effort: the engine logs a failed notification
//! and carries on.

use async_trait::async_trait;
use governance_domain::{Subject, Verdict, Vote, rejection_feedback};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by notification adapters
#[derive(Error, Debug, Clone)]
pub enum NotifyError {
    #[error("Notification channel closed")]
    ChannelClosed,

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// An outbound governance event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GovernanceEvent {
    /// A subject reached a terminal status
    DecisionReached {
        subject: Subject,
        verdict: Verdict,
        votes: Vec<Vote>,
        /// Rejecting justifications, sent to the author on rejection
        feedback: Option<String>,
    },
    /// A vote was recorded without deciding the subject
    VoteReceived { subject: Subject, vote: Vote },
}

impl GovernanceEvent {
    pub fn decision(subject: &Subject, verdict: Verdict, votes: &[Vote]) -> Self {
        let feedback = (!verdict.is_approved()).then(|| rejection_feedback(votes));
        GovernanceEvent::DecisionReached {
            subject: subject.clone(),
            verdict,
            votes: votes.to_vec(),
            feedback,
        }
    }

    pub fn vote_received(subject: &Subject, vote: &Vote) -> Self {
        GovernanceEvent::VoteReceived {
            subject: subject.clone(),
            vote: vote.clone(),
        }
    }

    pub fn subject(&self) -> &Subject {
        match self {
            GovernanceEvent::DecisionReached { subject, .. }
            | GovernanceEvent::VoteReceived { subject, .. } => subject,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            GovernanceEvent::DecisionReached { .. } => "decision_reached",
            GovernanceEvent::VoteReceived { .. } => "vote_received",
        }
    }
}

/// Port for fanning governance events out to affected users
#[async_trait]
pub trait GovernanceNotifier: Send + Sync {
    /// A subject reached `verdict`; `votes` are all live votes at that moment
    async fn notify_decision(
        &self,
        subject: &Subject,
        verdict: Verdict,
        votes: &[Vote],
    ) -> Result<(), NotifyError>;

    /// A vote was recorded but no verdict was reached
    async fn notify_vote_received(&self, subject: &Subject, vote: &Vote)
    -> Result<(), NotifyError>;
}

/// No-op notifier for tests and when notifications are disabled
pub struct NoNotifier;

#[async_trait]
impl GovernanceNotifier for NoNotifier {
    async fn notify_decision(
        &self,
        _subject: &Subject,
        _verdict: Verdict,
        _votes: &[Vote],
    ) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn notify_vote_received(
        &self,
        _subject: &Subject,
        _vote: &Vote,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
