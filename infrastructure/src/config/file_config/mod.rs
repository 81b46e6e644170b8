//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain values by
//! [`FileConfig::to_policy`].

mod audit;
mod engine;
mod notifications;
mod output;

pub use audit::FileAuditConfig;
pub use engine::FileEngineConfig;
pub use notifications::FileNotificationsConfig;
pub use output::FileOutputConfig;

use governance_domain::GovernancePolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("engine.tie_break: unknown value '{0}' (expected 'reject' or 'approve')")]
    InvalidTieBreak(String),

    #[error("audit.path cannot be empty when auditing is enabled")]
    EmptyAuditPath,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Decision rule settings
    pub engine: FileEngineConfig,
    /// Notification settings
    pub notifications: FileNotificationsConfig,
    /// Audit log settings
    pub audit: FileAuditConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.engine.parse_tie_break().is_none() {
            issues.push(ConfigValidationError::InvalidTieBreak(
                self.engine.tie_break.clone(),
            ));
        }

        if self.audit.enabled
            && self
                .audit
                .path
                .as_deref()
                .is_some_and(|p| p.trim().is_empty())
        {
            issues.push(ConfigValidationError::EmptyAuditPath);
        }

        issues
    }

    /// Build the engine policy; unknown values fall back to defaults
    pub fn to_policy(&self) -> GovernancePolicy {
        GovernancePolicy {
            tie_break: self.engine.parse_tie_break().unwrap_or_default(),
            notify_vote_received: self.notifications.notify_vote_received,
            empty_pool_publish: self.engine.empty_pool_publish,
        }
    }
}
