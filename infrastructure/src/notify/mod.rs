//! Notification adapters
//!
//! Implementations of [`GovernanceNotifier`] for delivering decision and
//! vote events after they are durable.
//!
//! - [`TracingNotifier`] - writes events to the diagnostic log
//! - [`OutboxNotifier`] - queues events on a channel for a separate consumer
//! - [`FanOutNotifier`] - delivers each event to several notifiers at once
//!
//! [`GovernanceNotifier`]: governance_application::GovernanceNotifier

mod fan_out;
mod outbox;
mod tracing_notifier;

pub use fan_out::FanOutNotifier;
pub use outbox::{OutboxNotifier, OutboxReceiver};
pub use tracing_notifier::TracingNotifier;
