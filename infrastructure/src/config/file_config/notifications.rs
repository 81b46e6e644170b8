//! Notification configuration from TOML (`[notifications]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationsConfig {
    /// Notify the author when a vote lands without deciding the subject
    pub notify_vote_received: bool,
}

impl Default for FileNotificationsConfig {
    fn default() -> Self {
        Self {
            notify_vote_received: true,
        }
    }
}
