//! Vote repository port

use super::store::StoreError;
use async_trait::async_trait;
use governance_domain::{SubjectId, UserId, Vote};

/// Persistence for votes, keyed by `(subject_id, reviewer_id)`
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the live vote of `reviewer` on `subject`
    async fn find_vote(
        &self,
        subject: &SubjectId,
        reviewer: &UserId,
    ) -> Result<Option<Vote>, StoreError>;

    /// All live votes on a subject, oldest first
    async fn list_votes(&self, subject: &SubjectId) -> Result<Vec<Vote>, StoreError>;

    /// Insert a first-time vote.
    ///
    /// Must fail with [`StoreError::Conflict`] if the reviewer already holds
    /// a vote on the subject.
    async fn insert_vote(&self, vote: Vote) -> Result<(), StoreError>;

    /// Overwrite an existing vote; fails with [`StoreError::NotFound`] if absent
    async fn update_vote(&self, vote: Vote) -> Result<(), StoreError>;

    /// Remove the vote of `reviewer` on `subject`; absent votes are not an error
    async fn delete_vote(&self, subject: &SubjectId, reviewer: &UserId) -> Result<(), StoreError>;
}
