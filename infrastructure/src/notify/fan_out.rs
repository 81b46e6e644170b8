//! Fan-out notifier: delegates to multiple notifiers.
//!
//! Used to deliver one governance event to several channels (diagnostic
//! log, outbox, push gateway) concurrently.

use async_trait::async_trait;
use futures::future::join_all;
use governance_application::{GovernanceNotifier, NotifyError};
use governance_domain::{Subject, Verdict, Vote};
use std::sync::Arc;
use tracing::warn;

/// A notifier that delivers every event to all delegates.
///
/// Delegates run concurrently. A failing delegate is logged and does not
/// stop the others; the first failure is returned once all have finished.
pub struct FanOutNotifier {
    delegates: Vec<Arc<dyn GovernanceNotifier>>,
}

impl FanOutNotifier {
    pub fn new(delegates: Vec<Arc<dyn GovernanceNotifier>>) -> Self {
        Self { delegates }
    }

    fn collect(results: Vec<Result<(), NotifyError>>) -> Result<(), NotifyError> {
        let mut first_error = None;
        for (index, result) in results.into_iter().enumerate() {
            if let Err(e) = result {
                warn!(delegate = index, "Notifier delegate failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl GovernanceNotifier for FanOutNotifier {
    async fn notify_decision(
        &self,
        subject: &Subject,
        verdict: Verdict,
        votes: &[Vote],
    ) -> Result<(), NotifyError> {
        let results = join_all(
            self.delegates
                .iter()
                .map(|d| d.notify_decision(subject, verdict, votes)),
        )
        .await;
        Self::collect(results)
    }

    async fn notify_vote_received(
        &self,
        subject: &Subject,
        vote: &Vote,
    ) -> Result<(), NotifyError> {
        let results = join_all(
            self.delegates
                .iter()
                .map(|d| d.notify_vote_received(subject, vote)),
        )
        .await;
        Self::collect(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::OutboxNotifier;

    struct Broken;

    #[async_trait]
    impl GovernanceNotifier for Broken {
        async fn notify_decision(
            &self,
            _subject: &Subject,
            _verdict: Verdict,
            _votes: &[Vote],
        ) -> Result<(), NotifyError> {
            Err(NotifyError::DeliveryFailed("offline".into()))
        }

        async fn notify_vote_received(
            &self,
            _subject: &Subject,
            _vote: &Vote,
        ) -> Result<(), NotifyError> {
            Err(NotifyError::DeliveryFailed("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_all_delegates_receive_event() {
        let (a, mut rx_a) = OutboxNotifier::channel();
        let (b, mut rx_b) = OutboxNotifier::channel();
        let fan_out = FanOutNotifier::new(vec![Arc::new(a), Arc::new(b)]);

        let subject = Subject::post("p-1", "c-1", "alice", "hi");
        fan_out
            .notify_decision(&subject, Verdict::Approved, &[])
            .await
            .unwrap();

        assert_eq!(rx_a.drain().len(), 1);
        assert_eq!(rx_b.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_delegates() {
        let (ok, mut rx) = OutboxNotifier::channel();
        let fan_out = FanOutNotifier::new(vec![Arc::new(Broken), Arc::new(ok)]);

        let subject = Subject::post("p-1", "c-1", "alice", "hi");
        let vote = Vote::approve("p-1", "bob", "ok");
        let result = fan_out.notify_vote_received(&subject, &vote).await;

        assert!(matches!(result, Err(NotifyError::DeliveryFailed(_))));
        assert_eq!(rx.drain().len(), 1);
    }
}
