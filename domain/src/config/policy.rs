//! Governance policy value objects

use crate::core::error::DomainError;
use crate::quorum::Verdict;
use serde::{Deserialize, Serialize};

/// Verdict applied when every eligible contributor voted and the sides are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Conservative default: an exact tie sends the subject back
    #[default]
    Reject,
    Approve,
}

impl TieBreak {
    pub fn verdict(&self) -> Verdict {
        match self {
            TieBreak::Reject => Verdict::Rejected,
            TieBreak::Approve => Verdict::Approved,
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" | "rejected" => Ok(TieBreak::Reject),
            "approve" | "approved" => Ok(TieBreak::Approve),
            _ => Err(DomainError::InvalidTieBreak(s.to_string())),
        }
    }
}

/// Runtime policy for the governance engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernancePolicy {
    /// Verdict for an exact tie under full participation
    pub tie_break: TieBreak,
    /// Send a "vote received" notification when a vote does not decide
    pub notify_vote_received: bool,
    /// Let the author publish a subject whose eligible pool is empty
    pub empty_pool_publish: bool,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Reject,
            notify_vote_received: true,
            empty_pool_publish: false,
        }
    }
}
