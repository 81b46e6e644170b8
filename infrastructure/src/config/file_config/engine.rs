//! Engine configuration from TOML (`[engine]` section)
//!
//! ```toml
//! [engine]
//! tie_break = "reject"        # or "approve"
//! empty_pool_publish = false
//! ```

use governance_domain::TieBreak;
use serde::{Deserialize, Serialize};

/// Raw engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Verdict for an exact tie once everyone voted: "reject" or "approve"
    pub tie_break: String,
    /// Allow manual publish when the community has no eligible reviewers
    pub empty_pool_publish: bool,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            tie_break: "reject".to_string(),
            empty_pool_publish: false,
        }
    }
}

impl FileEngineConfig {
    /// Parse the tie-break string, `None` if unrecognized
    pub fn parse_tie_break(&self) -> Option<TieBreak> {
        self.tie_break.parse().ok()
    }
}
