//! In-memory contributor pool

use super::poisoned;
use async_trait::async_trait;
use governance_application::{ContributorPool, StoreError};
use governance_domain::{CommunityId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// A community's reviewers: its creator plus the contributor set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub creator: UserId,
    #[serde(default)]
    pub contributors: BTreeSet<UserId>,
}

impl Community {
    pub fn new(id: impl Into<CommunityId>, creator: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            creator: creator.into(),
            contributors: BTreeSet::new(),
        }
    }

    pub fn with_contributors<I, U>(mut self, contributors: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        self.contributors
            .extend(contributors.into_iter().map(Into::into));
        self
    }

    /// Eligible voters: contributors plus the creator, deduplicated
    pub fn eligible(&self) -> BTreeSet<&UserId> {
        let mut pool: BTreeSet<&UserId> = self.contributors.iter().collect();
        pool.insert(&self.creator);
        pool
    }

    pub fn is_eligible(&self, user: &UserId) -> bool {
        &self.creator == user || self.contributors.contains(user)
    }
}

/// Communities held in memory
#[derive(Default)]
pub struct InMemoryContributorPool {
    communities: RwLock<HashMap<CommunityId, Community>>,
}

impl InMemoryContributorPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a community
    pub fn add_community(&self, community: Community) -> Result<(), StoreError> {
        self.communities
            .write()
            .map_err(poisoned)?
            .insert(community.id.clone(), community);
        Ok(())
    }

    /// Add a contributor to an existing community
    pub fn add_contributor(
        &self,
        community: &CommunityId,
        user: impl Into<UserId>,
    ) -> Result<(), StoreError> {
        let mut communities = self.communities.write().map_err(poisoned)?;
        let entry = communities
            .get_mut(community)
            .ok_or_else(|| StoreError::NotFound(format!("community {community}")))?;
        entry.contributors.insert(user.into());
        Ok(())
    }

    fn with_community<T>(
        &self,
        community: &CommunityId,
        f: impl FnOnce(&Community) -> T,
    ) -> Result<T, StoreError> {
        let communities = self.communities.read().map_err(poisoned)?;
        communities
            .get(community)
            .map(f)
            .ok_or_else(|| StoreError::NotFound(format!("community {community}")))
    }
}

#[async_trait]
impl ContributorPool for InMemoryContributorPool {
    async fn eligible_count(
        &self,
        community: &CommunityId,
        excluding: &UserId,
    ) -> Result<usize, StoreError> {
        self.with_community(community, |c| {
            let mut pool = c.eligible();
            pool.remove(excluding);
            pool.len()
        })
    }

    async fn is_eligible(
        &self,
        community: &CommunityId,
        user: &UserId,
    ) -> Result<bool, StoreError> {
        self.with_community(community, |c| c.is_eligible(user))
    }
}
