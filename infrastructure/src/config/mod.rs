//! Configuration file loading for community-governance
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GOVERNANCE_` environment variables (`GOVERNANCE_ENGINE__TIE_BREAK=approve`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./governance.toml` or `./.governance.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/community-governance/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuditConfig, FileConfig, FileEngineConfig,
    FileNotificationsConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
