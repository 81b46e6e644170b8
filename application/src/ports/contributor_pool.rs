//! Contributor pool port
//!
//! One capability check for "is this user allowed to review content in this
//! community". The community creator always counts as a contributor.

use super::store::StoreError;
use async_trait::async_trait;
use governance_domain::{CommunityId, UserId};

#[async_trait]
pub trait ContributorPool: Send + Sync {
    /// Number of eligible voters in `community`, not counting `excluding`
    /// (the author of the subject being reviewed)
    async fn eligible_count(
        &self,
        community: &CommunityId,
        excluding: &UserId,
    ) -> Result<usize, StoreError>;

    /// Whether `user` is a contributor or the creator of `community`
    async fn is_eligible(&self, community: &CommunityId, user: &UserId)
    -> Result<bool, StoreError>;
}
