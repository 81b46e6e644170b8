//! Outbox notifier
//!
//! Events are pushed onto an unbounded channel and delivered by whoever
//! drains the [`OutboxReceiver`]. Publishing never blocks the engine.

use async_trait::async_trait;
use governance_application::{GovernanceEvent, GovernanceNotifier, NotifyError};
use governance_domain::{Subject, Verdict, Vote};
use tokio::sync::mpsc;

/// Producer side of the outbox
#[derive(Clone)]
pub struct OutboxNotifier {
    sender: mpsc::UnboundedSender<GovernanceEvent>,
}

/// Consumer side of the outbox
pub struct OutboxReceiver {
    receiver: mpsc::UnboundedReceiver<GovernanceEvent>,
}

impl OutboxNotifier {
    /// Create a connected notifier/receiver pair
    pub fn channel() -> (Self, OutboxReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, OutboxReceiver { receiver })
    }

    fn publish(&self, event: GovernanceEvent) -> Result<(), NotifyError> {
        self.sender
            .send(event)
            .map_err(|_| NotifyError::ChannelClosed)
    }
}

impl OutboxReceiver {
    /// Wait for the next event; `None` once every notifier is dropped
    pub async fn recv(&mut self) -> Option<GovernanceEvent> {
        self.receiver.recv().await
    }

    /// Take every event queued so far without waiting
    pub fn drain(&mut self) -> Vec<GovernanceEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

#[async_trait]
impl GovernanceNotifier for OutboxNotifier {
    async fn notify_decision(
        &self,
        subject: &Subject,
        verdict: Verdict,
        votes: &[Vote],
    ) -> Result<(), NotifyError> {
        self.publish(GovernanceEvent::decision(subject, verdict, votes))
    }

    async fn notify_vote_received(
        &self,
        subject: &Subject,
        vote: &Vote,
    ) -> Result<(), NotifyError> {
        self.publish(GovernanceEvent::vote_received(subject, vote))
    }
}
