//! Subjects under review
//!
//! A subject is anything the community votes on before it becomes visible.
//! Three kinds exist and all of them share the same governance semantics:
//!
//! ```text
//!   Post          community-wide publication vote
//!   Enrichment    revision proposed for an existing post
//!   Contribution  content submitted while a community is being created
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! PENDING ──(quorum)──> APPROVED            (terminal)
//!    │
//!    └────(quorum)──> REJECTED ──> DRAFT ──(resubmit)──> new PENDING subject
//! ```

pub mod entities;

pub use entities::{Subject, SubjectKind, SubjectStatus};
