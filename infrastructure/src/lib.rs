//! Infrastructure layer for community-governance
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: in-memory stores, notifiers, the JSONL
//! audit log, and configuration file loading.

pub mod config;
pub mod logging;
pub mod memory;
pub mod notify;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAuditConfig, FileConfig, FileEngineConfig,
    FileNotificationsConfig, FileOutputConfig,
};
pub use logging::JsonlAuditLogger;
pub use memory::{
    Community, InMemoryContributorPool, InMemorySubjectRepository, InMemoryVoteRepository,
    StoreContentMutator,
};
pub use notify::{FanOutNotifier, OutboxNotifier, OutboxReceiver, TracingNotifier};
