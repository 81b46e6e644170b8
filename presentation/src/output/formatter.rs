//! Output formatter trait

use governance_application::{GovernanceError, GovernanceEvent, PublishOutcome, VoteOutcome};
use governance_domain::{Decision, QuorumThresholds, Subject};

/// Trait for formatting governance outcomes
pub trait OutputFormatter {
    /// A recorded (or revised) vote and the recount that followed
    fn format_vote(&self, outcome: &VoteOutcome) -> String;

    /// A successful manual publish
    fn format_publish(&self, outcome: &PublishOutcome) -> String;

    /// A new pending subject created from a rejected one
    fn format_resubmit(&self, previous: &Subject, fresh: &Subject) -> String;

    /// Current tally of a subject, without side effects
    fn format_inspect(&self, subject: &Subject, decision: &Decision) -> String;

    /// An outbound notification
    fn format_event(&self, event: &GovernanceEvent) -> String;

    /// A refused operation
    fn format_error(&self, action: &str, error: &GovernanceError) -> String;

    /// Quorum thresholds for a range of pool sizes
    fn format_thresholds(&self, rows: &[QuorumThresholds]) -> String;
}
