//! Console output formatter for governance outcomes

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use governance_application::{GovernanceError, GovernanceEvent, PublishOutcome, VoteOutcome};
use governance_domain::{
    Decision, OutputFormat, QuorumThresholds, Subject, SubjectStatus, Verdict,
};
use serde::Serialize;
use serde_json::json;

const PREVIEW_CHARS: usize = 48;

/// Formats governance outcomes for console display
pub struct ConsoleFormatter {
    format: OutputFormat,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Turn off ANSI colors for the rest of the process
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format any serializable value as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn status(status: SubjectStatus) -> ColoredString {
        match status {
            SubjectStatus::Approved => status.as_str().green().bold(),
            SubjectStatus::Rejected => status.as_str().red().bold(),
            SubjectStatus::Draft => status.as_str().yellow(),
            SubjectStatus::Pending => status.as_str().cyan(),
        }
    }

    fn verdict(decision: &Decision) -> ColoredString {
        match decision.verdict {
            Some(Verdict::Approved) => "APPROVED".green().bold(),
            Some(Verdict::Rejected) => "REJECTED".red().bold(),
            None => "undecided".dimmed(),
        }
    }

    /// First line of a justification or post body, at most `PREVIEW_CHARS`
    /// characters; a trailing ellipsis marks anything left out
    fn preview(content: &str) -> String {
        let content = content.trim();
        let first_line = content.lines().next().unwrap_or_default();
        let excerpt: String = first_line.chars().take(PREVIEW_CHARS).collect();
        if excerpt.len() < content.len() {
            format!("{}…", excerpt.trim_end())
        } else {
            excerpt
        }
    }

    fn decision_block(decision: &Decision) -> String {
        let mut output = format!(
            "  {} {} {}\n",
            "Tally:".cyan(),
            decision.tally.summary(),
            decision.tally
        );
        output.push_str(&format!(
            "  {} {}\n",
            "Quorum:".cyan(),
            decision.thresholds
        ));
        output.push_str(&format!(
            "  {} {} ({})\n",
            "Verdict:".cyan(),
            Self::verdict(decision),
            decision.reason.as_str()
        ));
        if decision.verdict.is_none() {
            let missing = decision.approvals_missing();
            if missing > 0 {
                output.push_str(&format!(
                    "  {} more approval(s) needed\n",
                    missing.to_string().bold()
                ));
            }
        }
        output
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_vote(&self, outcome: &VoteOutcome) -> String {
        let vote = &outcome.vote;
        match self.format {
            OutputFormat::Json => Self::format_json(&json!({
                "action": if vote.is_revised() { "update" } else { "vote" },
                "outcome": outcome,
            })),
            OutputFormat::Compact => format!(
                "{} {} {} on {} -> {} {}",
                if vote.is_revised() { "~" } else { "+" },
                vote.reviewer_id,
                vote.decision,
                vote.subject_id,
                Self::status(outcome.subject.status),
                outcome.decision.tally.summary()
            ),
            OutputFormat::Full => {
                let verb = if vote.is_revised() { "revised" } else { "voted" };
                let mut output = Self::section_header(&format!(
                    "{} {} {} on {}",
                    vote.reviewer_id, verb, vote.decision, vote.subject_id
                ));
                if !vote.content.is_empty() {
                    output.push_str(&format!("  \"{}\"\n", Self::preview(&vote.content)));
                }
                output.push_str(&Self::decision_block(&outcome.decision));
                output.push_str(&format!(
                    "  {} {}",
                    "Status:".cyan(),
                    Self::status(outcome.subject.status)
                ));
                if outcome.transitioned {
                    output.push_str(&format!(" {}", "(decided by this vote)".dimmed()));
                }
                output.push('\n');
                output
            }
        }
    }

    fn format_publish(&self, outcome: &PublishOutcome) -> String {
        match self.format {
            OutputFormat::Json => Self::format_json(&json!({
                "action": "publish",
                "outcome": outcome,
            })),
            OutputFormat::Compact => format!(
                "! {} published by {} -> {}",
                outcome.subject.id,
                outcome.subject.author_id,
                Self::status(outcome.subject.status)
            ),
            OutputFormat::Full => {
                let mut output = Self::section_header(&format!(
                    "{} published {}",
                    outcome.subject.author_id, outcome.subject.id
                ));
                output.push_str(&Self::decision_block(&outcome.decision));
                output.push_str(&format!(
                    "  {} {}\n",
                    "Status:".cyan(),
                    Self::status(outcome.subject.status)
                ));
                output
            }
        }
    }

    fn format_resubmit(&self, previous: &Subject, fresh: &Subject) -> String {
        match self.format {
            OutputFormat::Json => Self::format_json(&json!({
                "action": "resubmit",
                "previous": previous.id,
                "subject": fresh,
            })),
            OutputFormat::Compact => format!(
                "* {} resubmitted as {} -> {}",
                previous.id,
                fresh.id,
                Self::status(fresh.status)
            ),
            OutputFormat::Full => {
                let mut output = Self::section_header(&format!(
                    "{} resubmitted {} as {}",
                    fresh.author_id, previous.id, fresh.id
                ));
                output.push_str(&format!("  \"{}\"\n", Self::preview(&fresh.content)));
                output.push_str(&format!(
                    "  {} {}\n",
                    "Status:".cyan(),
                    Self::status(fresh.status)
                ));
                output
            }
        }
    }

    fn format_inspect(&self, subject: &Subject, decision: &Decision) -> String {
        match self.format {
            OutputFormat::Json => Self::format_json(&json!({
                "action": "inspect",
                "subject": subject,
                "decision": decision,
            })),
            OutputFormat::Compact => format!(
                "? {} {} {} ({} more approval(s))",
                subject.id,
                Self::status(subject.status),
                decision.tally.summary(),
                decision.approvals_missing()
            ),
            OutputFormat::Full => {
                let mut output = Self::section_header(&format!(
                    "{} {} by {}",
                    subject.kind, subject.id, subject.author_id
                ));
                output.push_str(&format!("  \"{}\"\n", Self::preview(&subject.content)));
                output.push_str(&format!(
                    "  {} {}\n",
                    "Status:".cyan(),
                    Self::status(subject.status)
                ));
                output.push_str(&Self::decision_block(decision));
                output
            }
        }
    }

    fn format_event(&self, event: &GovernanceEvent) -> String {
        if self.format == OutputFormat::Json {
            return Self::format_json(&json!({ "notification": event }));
        }

        let subject = event.subject();
        match event {
            GovernanceEvent::DecisionReached {
                verdict, feedback, ..
            } => {
                let verdict = match verdict {
                    Verdict::Approved => verdict.to_string().green(),
                    Verdict::Rejected => verdict.to_string().red(),
                };
                let mut output = format!(
                    "{} {} {} {} is {}",
                    "[notify]".magenta(),
                    subject.author_id,
                    "<-".dimmed(),
                    subject.id,
                    verdict
                );
                if let Some(feedback) = feedback.as_deref().filter(|f| !f.is_empty()) {
                    if self.format == OutputFormat::Full {
                        output.push('\n');
                        output.push_str(&Self::indent(feedback, "    > "));
                    } else {
                        output.push_str(&format!(" ({})", Self::preview(feedback)));
                    }
                }
                output
            }
            GovernanceEvent::VoteReceived { vote, .. } => format!(
                "{} {} {} {} {} on {}",
                "[notify]".magenta(),
                subject.author_id,
                "<-".dimmed(),
                vote.reviewer_id,
                vote.decision,
                subject.id
            ),
        }
    }

    fn format_error(&self, action: &str, error: &GovernanceError) -> String {
        match self.format {
            OutputFormat::Json => Self::format_json(&json!({
                "action": action,
                "error": error.code(),
                "message": error.to_string(),
            })),
            OutputFormat::Compact => format!("x {}: {}", action, error),
            OutputFormat::Full => format!(
                "{} {} {}\n",
                "Refused:".red().bold(),
                action,
                format!("({})", error).red()
            ),
        }
    }

    fn format_thresholds(&self, rows: &[QuorumThresholds]) -> String {
        if self.format == OutputFormat::Json {
            return Self::format_json(&rows);
        }

        let mut output = format!(
            "{:>12}  {:>9}  {:>13}\n",
            "contributors".bold(),
            "approvals".bold(),
            "participation".bold()
        );
        for row in rows {
            let count = if row.is_even() {
                format!("{} (even)", row.contributors_count)
            } else {
                row.contributors_count.to_string()
            };
            output.push_str(&format!(
                "{:>12}  {:>9}  {:>13}\n",
                count, row.required_approvals, row.required_participation
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_domain::{TieBreak, Vote, VoteTally};

    fn outcome(approved: usize, pool: usize) -> VoteOutcome {
        let thresholds = QuorumThresholds::for_pool(pool);
        let decision = Decision::evaluate(
            VoteTally {
                approved,
                rejected: 0,
            },
            thresholds,
            TieBreak::Reject,
        );
        let status = decision
            .verdict
            .map(|v| v.as_status())
            .unwrap_or(SubjectStatus::Pending);
        VoteOutcome {
            vote: Vote::approve("p-1", "bob", "Looks good"),
            subject: Subject::post("p-1", "c-1", "alice", "Hello")
                .with_status(status),
            decision,
            transitioned: decision.should_update(),
        }
    }

    #[test]
    fn test_full_vote_shows_missing_approvals() {
        let text = ConsoleFormatter::new(OutputFormat::Full).format_vote(&outcome(1, 4));
        assert!(text.contains("bob voted APPROVED on p-1"));
        assert!(text.contains("more approval(s) needed"));
        assert!(text.contains("PENDING"));
    }

    #[test]
    fn test_compact_vote_is_single_line() {
        let text = ConsoleFormatter::new(OutputFormat::Compact).format_vote(&outcome(3, 4));
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("APPROVED"));
    }

    #[test]
    fn test_json_vote_is_parseable() {
        let text = ConsoleFormatter::new(OutputFormat::Json).format_vote(&outcome(3, 4));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["action"], "vote");
        assert_eq!(value["outcome"]["subject"]["status"], "APPROVED");
        assert_eq!(value["outcome"]["decision"]["reason"], "approval_quorum");
    }

    #[test]
    fn test_json_error_carries_code() {
        let text = ConsoleFormatter::new(OutputFormat::Json)
            .format_error("vote", &GovernanceError::SelfReview);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["action"], "vote");
        assert_eq!(value["error"], GovernanceError::SelfReview.code());
    }

    #[test]
    fn test_thresholds_table() {
        let rows: Vec<_> = (0..=4).map(QuorumThresholds::for_pool).collect();
        let text = ConsoleFormatter::new(OutputFormat::Full).format_thresholds(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        // 4 contributors: 3 approvals, 2 participation
        assert!(lines[5].contains("4 (even)"));
        assert!(lines[5].trim_end().ends_with('2'));
    }

    #[test]
    fn test_rejection_event_shows_feedback() {
        let subject = Subject::post("p-1", "c-1", "alice", "Hello");
        let votes = vec![Vote::reject("p-1", "bob", "Needs sources")];
        let event = GovernanceEvent::decision(&subject, Verdict::Rejected, &votes);

        let text = ConsoleFormatter::new(OutputFormat::Full).format_event(&event);
        assert!(text.contains("> bob: Needs sources"));
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(200);
        let preview = ConsoleFormatter::preview(&long);
        assert!(preview.ends_with('…'));
        assert!(preview.len() < 60);
    }

    #[test]
    fn test_preview_keeps_first_line_of_justification() {
        let justification = "Needs sources. \nSee the community guidelines.";
        assert_eq!(ConsoleFormatter::preview(justification), "Needs sources.…");
        assert_eq!(ConsoleFormatter::preview("  Looks good\n"), "Looks good");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let japanese = "あ".repeat(60);
        let preview = ConsoleFormatter::preview(&japanese);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.starts_with(&"あ".repeat(PREVIEW_CHARS)));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
