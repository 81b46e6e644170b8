//! Audit log configuration from TOML (`[audit]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw audit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Write governance events to a JSONL file
    pub enabled: bool,
    /// Destination of the JSONL audit log
    pub path: Option<String>,
}

impl FileAuditConfig {
    /// Resolved log path, falling back to the platform data directory
    pub fn resolve_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(p) => Some(PathBuf::from(p)),
            None => dirs::data_dir()
                .map(|d| d.join("community-governance").join("audit.jsonl")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = FileAuditConfig {
            enabled: true,
            path: Some("/tmp/gov.jsonl".to_string()),
        };
        assert_eq!(config.resolve_path(), Some(PathBuf::from("/tmp/gov.jsonl")));
    }
}
