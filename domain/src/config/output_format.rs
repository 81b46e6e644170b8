//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for governance outcomes
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full formatted output with tallies and thresholds (default)
    #[default]
    Full,
    /// One line per outcome
    Compact,
    /// JSON output
    Json,
}
