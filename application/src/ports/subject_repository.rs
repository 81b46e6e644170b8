//! Subject repository port

use super::store::StoreError;
use async_trait::async_trait;
use governance_domain::{Subject, SubjectId, SubjectKind, SubjectStatus};

/// Persistence for subjects under review
///
/// Implementations live in the infrastructure layer. `compare_and_set_status`
/// is the only way a subject reaches a terminal status, so it must be atomic.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Load a subject by id
    async fn load_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StoreError>;

    /// Persist a new subject; fails with `Conflict` if the id is taken
    async fn insert_subject(&self, subject: Subject) -> Result<(), StoreError>;

    /// Atomically move `id` from `expected` to `next`.
    ///
    /// Returns `Ok(false)` when the current status is not `expected`
    /// (another writer got there first).
    async fn compare_and_set_status(
        &self,
        id: &SubjectId,
        expected: SubjectStatus,
        next: SubjectStatus,
    ) -> Result<bool, StoreError>;

    /// Allocate a fresh, unused id for a subject of `kind`
    async fn next_subject_id(&self, kind: &SubjectKind) -> Result<SubjectId, StoreError>;
}
