//! Scripted review scenarios
//!
//! A scenario file seeds communities and subjects into in-memory stores and
//! then replays a list of governance actions against the engine:
//!
//! ```json
//! {
//!   "communities": [{ "id": "c-1", "creator": "owner", "contributors": ["alice", "bob"] }],
//!   "subjects": [{ "id": "p-1", "kind": "post", "community_id": "c-1",
//!                  "author_id": "alice", "content": "Hello" }],
//!   "steps": [
//!     { "action": "vote", "subject": "p-1", "reviewer": "bob", "decision": "APPROVED" },
//!     { "action": "vote", "subject": "p-1", "reviewer": "alice", "decision": "APPROVED",
//!       "expect": "self_review" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use governance_application::{
    CastVoteInput, GovernanceEngine, GovernanceError, GovernanceNotifier, SubjectRepository,
};
use governance_domain::{GovernancePolicy, Subject, SubjectId, UserId, VoteDecision};
use governance_infrastructure::{
    Community, FanOutNotifier, FileConfig, InMemoryContributorPool, InMemorySubjectRepository,
    InMemoryVoteRepository, JsonlAuditLogger, OutboxNotifier, OutboxReceiver,
    StoreContentMutator, TracingNotifier,
};
use governance_presentation::{ConsoleFormatter, OutputFormatter};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Contents of a scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub communities: Vec<Community>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Overrides the configured engine policy
    #[serde(default)]
    pub policy: Option<GovernancePolicy>,
    pub steps: Vec<Step>,
}

/// One action plus the error code it is expected to fail with, if any
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: Action,
    #[serde(default)]
    pub expect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Vote {
        subject: String,
        reviewer: UserId,
        decision: VoteDecision,
        #[serde(default)]
        content: String,
    },
    Update {
        subject: String,
        reviewer: UserId,
        decision: VoteDecision,
        #[serde(default)]
        content: String,
    },
    Publish {
        subject: String,
        requester: UserId,
    },
    Resubmit {
        subject: String,
        requester: UserId,
        content: String,
        /// Name later steps use to refer to the new subject
        #[serde(default, rename = "as")]
        alias: Option<String>,
    },
    Inspect {
        subject: String,
    },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Vote { .. } => "vote",
            Action::Update { .. } => "update",
            Action::Publish { .. } => "publish",
            Action::Resubmit { .. } => "resubmit",
            Action::Inspect { .. } => "inspect",
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid scenario file {}", path.display()))
    }
}

/// What happened while running a scenario
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: usize,
    pub refused: usize,
    /// Steps whose result differed from `expect`
    pub mismatches: usize,
    pub notifications: usize,
}

/// Wires in-memory adapters around one engine and replays steps
pub struct ScenarioRunner {
    engine: GovernanceEngine,
    subjects: Arc<InMemorySubjectRepository>,
    outbox: OutboxReceiver,
    aliases: HashMap<String, SubjectId>,
}

impl ScenarioRunner {
    pub async fn new(scenario: &Scenario, config: &FileConfig) -> Result<Self> {
        let subjects = Arc::new(InMemorySubjectRepository::new());
        let votes = Arc::new(InMemoryVoteRepository::new());
        let pool = Arc::new(InMemoryContributorPool::new());

        for community in &scenario.communities {
            pool.add_community(community.clone())?;
        }
        for subject in &scenario.subjects {
            subjects
                .insert_subject(subject.clone())
                .await
                .with_context(|| format!("Failed to seed subject {}", subject.id))?;
        }

        let (outbox_notifier, outbox) = OutboxNotifier::channel();
        let notifiers: Vec<Arc<dyn GovernanceNotifier>> =
            vec![Arc::new(TracingNotifier), Arc::new(outbox_notifier)];
        let policy = scenario.policy.unwrap_or_else(|| config.to_policy());

        let mut engine = GovernanceEngine::new(
            subjects.clone(),
            votes,
            pool,
            Arc::new(StoreContentMutator::new(subjects.clone())),
        )
        .with_notifier(Arc::new(FanOutNotifier::new(notifiers)))
        .with_policy(policy);

        if config.audit.enabled {
            match config.audit.resolve_path().and_then(JsonlAuditLogger::new) {
                Some(logger) => {
                    info!("Audit log: {}", logger.path().display());
                    engine = engine.with_audit_logger(Arc::new(logger));
                }
                None => warn!("Audit logging enabled but no log file could be opened"),
            }
        }

        Ok(Self {
            engine,
            subjects,
            outbox,
            aliases: HashMap::new(),
        })
    }

    fn resolve(&self, name: &str) -> SubjectId {
        self.aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| SubjectId::from(name))
    }

    /// Run one action, returning its printed form or the refusal
    async fn execute(
        &mut self,
        action: &Action,
        formatter: &ConsoleFormatter,
    ) -> Result<String, GovernanceError> {
        match action {
            Action::Vote {
                subject,
                reviewer,
                decision,
                content,
            } => {
                let input =
                    CastVoteInput::new(self.resolve(subject), reviewer.clone(), *decision, content);
                let outcome = self.engine.submit_vote(input).await?;
                Ok(formatter.format_vote(&outcome))
            }
            Action::Update {
                subject,
                reviewer,
                decision,
                content,
            } => {
                let input =
                    CastVoteInput::new(self.resolve(subject), reviewer.clone(), *decision, content);
                let outcome = self.engine.update_vote(input).await?;
                Ok(formatter.format_vote(&outcome))
            }
            Action::Publish { subject, requester } => {
                let outcome = self
                    .engine
                    .attempt_publish(&self.resolve(subject), requester)
                    .await?;
                Ok(formatter.format_publish(&outcome))
            }
            Action::Resubmit {
                subject,
                requester,
                content,
                alias,
            } => {
                let previous_id = self.resolve(subject);
                let fresh = self
                    .engine
                    .resubmit(&previous_id, requester, content.as_str())
                    .await?;
                if let Some(alias) = alias {
                    self.aliases.insert(alias.clone(), fresh.id.clone());
                }
                let previous = self
                    .subjects
                    .get(&previous_id)
                    .ok_or_else(|| GovernanceError::SubjectNotFound(previous_id.clone()))?;
                Ok(formatter.format_resubmit(&previous, &fresh))
            }
            Action::Inspect { subject } => {
                let id = self.resolve(subject);
                let decision = self.engine.inspect(&id).await?;
                let current = self
                    .subjects
                    .get(&id)
                    .ok_or_else(|| GovernanceError::SubjectNotFound(id.clone()))?;
                Ok(formatter.format_inspect(&current, &decision))
            }
        }
    }

    /// Replay every step, printing outcomes and delivered notifications
    pub async fn run(
        &mut self,
        steps: &[Step],
        formatter: &ConsoleFormatter,
        quiet: bool,
    ) -> RunReport {
        let mut report = RunReport::default();

        for (index, step) in steps.iter().enumerate() {
            report.steps += 1;
            let result = self.execute(&step.action, formatter).await;

            let actual = result.as_ref().err().map(GovernanceError::code);
            if step.expect.as_deref() != actual {
                report.mismatches += 1;
                warn!(
                    step = index + 1,
                    expected = step.expect.as_deref().unwrap_or("ok"),
                    actual = actual.unwrap_or("ok"),
                    "Step did not go as expected"
                );
            }

            match result {
                Ok(text) => {
                    if !quiet {
                        println!("{}", text);
                    }
                }
                Err(e) => {
                    report.refused += 1;
                    if !quiet || step.expect.is_none() {
                        println!("{}", formatter.format_error(step.action.name(), &e));
                    }
                }
            }

            for event in self.outbox.drain() {
                report.notifications += 1;
                if !quiet {
                    println!("{}", formatter.format_event(&event));
                }
            }
        }

        report
    }

    /// Print every subject with its current tally
    pub async fn print_summary(&self, formatter: &ConsoleFormatter) -> Result<()> {
        for subject in self.subjects.all() {
            let decision = self.engine.inspect(&subject.id).await?;
            println!("{}", formatter.format_inspect(&subject, &decision));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_domain::{OutputFormat, SubjectStatus};

    const SCENARIO: &str = r#"{
        "communities": [
            { "id": "c-1", "creator": "owner", "contributors": ["alice", "bob", "carol", "dave"] }
        ],
        "subjects": [
            { "id": "p-1", "kind": "post", "community_id": "c-1", "author_id": "alice",
              "content": "First post" }
        ],
        "steps": [
            { "action": "vote", "subject": "p-1", "reviewer": "alice", "decision": "APPROVED",
              "expect": "self_review" },
            { "action": "vote", "subject": "p-1", "reviewer": "bob", "decision": "REJECTED",
              "content": "Needs sources" },
            { "action": "vote", "subject": "p-1", "reviewer": "bob", "decision": "APPROVED",
              "expect": "duplicate_vote" },
            { "action": "publish", "subject": "p-1", "requester": "alice",
              "expect": "insufficient_participation" },
            { "action": "vote", "subject": "p-1", "reviewer": "carol", "decision": "REJECTED" },
            { "action": "vote", "subject": "p-1", "reviewer": "dave", "decision": "REJECTED" },
            { "action": "vote", "subject": "p-1", "reviewer": "owner", "decision": "APPROVED",
              "expect": "subject_closed" },
            { "action": "resubmit", "subject": "p-1", "requester": "alice",
              "content": "First post, with sources", "as": "retry" },
            { "action": "update", "subject": "retry", "reviewer": "bob", "decision": "APPROVED",
              "expect": "vote_not_found" },
            { "action": "inspect", "subject": "retry" }
        ]
    }"#;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
        assert_eq!(scenario.communities[0].contributors.len(), 4);
        assert_eq!(scenario.subjects[0].status, SubjectStatus::Pending);
        assert_eq!(scenario.steps.len(), 10);
        assert!(matches!(
            &scenario.steps[7].action,
            Action::Resubmit { alias: Some(a), .. } if a == "retry"
        ));
    }

    #[tokio::test]
    async fn test_run_scenario_meets_expectations() {
        let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
        let mut runner = ScenarioRunner::new(&scenario, &FileConfig::default())
            .await
            .unwrap();
        let formatter = ConsoleFormatter::new(OutputFormat::Compact);

        let report = runner.run(&scenario.steps, &formatter, true).await;

        assert_eq!(report.steps, 10);
        assert_eq!(report.mismatches, 0);
        assert_eq!(report.refused, 5);
        // One vote-received per undecided vote, then the rejection
        assert_eq!(report.notifications, 3);
        assert_eq!(
            runner.subjects.get(&SubjectId::from("p-1")).unwrap().status,
            SubjectStatus::Draft
        );
        assert_eq!(runner.aliases.len(), 1);
    }
}
