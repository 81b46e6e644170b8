//! Quorum thresholds
//!
//! Pure functions of the eligible-voter pool size. Every subject kind uses
//! the same arithmetic; the automatic tally and the manual publish check both
//! read from here so the two paths cannot drift apart.

use serde::{Deserialize, Serialize};

/// Minimum approvals needed for acceptance: a strict majority of the pool.
///
/// For an even pool an exact half is a tie, so one extra vote is demanded.
/// For an odd pool the ceiling of half is already a strict majority.
///
/// ```
/// use governance_domain::quorum::required_approvals;
///
/// assert_eq!(required_approvals(4), 3);
/// assert_eq!(required_approvals(5), 3);
/// assert_eq!(required_approvals(2), 2);
/// ```
pub fn required_approvals(contributors_count: usize) -> usize {
    if contributors_count % 2 == 0 {
        contributors_count / 2 + 1
    } else {
        contributors_count.div_ceil(2)
    }
}

/// Minimum number of cast votes (of either decision) before the author may
/// ask for a manual publish.
pub fn required_participation(contributors_count: usize) -> usize {
    contributors_count.div_ceil(2)
}

/// Thresholds for one subject, computed from its eligible pool size
///
/// # Example
///
/// ```
/// use governance_domain::quorum::QuorumThresholds;
///
/// let t = QuorumThresholds::for_pool(5);
/// assert_eq!(t.required_approvals, 3);
/// assert_eq!(t.required_participation, 3);
/// assert!(!t.is_even());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumThresholds {
    /// Eligible voters for the subject (author excluded)
    pub contributors_count: usize,
    /// Approvals (or rejections) needed for a verdict
    pub required_approvals: usize,
    /// Votes needed before a manual publish is considered
    pub required_participation: usize,
}

impl QuorumThresholds {
    pub fn for_pool(contributors_count: usize) -> Self {
        Self {
            contributors_count,
            required_approvals: required_approvals(contributors_count),
            required_participation: required_participation(contributors_count),
        }
    }

    pub fn is_even(&self) -> bool {
        self.contributors_count % 2 == 0
    }

    /// Whether any automatic verdict can ever be reached
    pub fn is_reachable(&self) -> bool {
        self.contributors_count > 0
    }

    /// Approvals still missing, given the current approval count
    pub fn approvals_missing(&self, approved: usize) -> usize {
        self.required_approvals.saturating_sub(approved)
    }
}

impl std::fmt::Display for QuorumThresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} contributors (participation {})",
            self.required_approvals, self.contributors_count, self.required_participation
        )
    }
}
