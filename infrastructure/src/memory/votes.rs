//! In-memory vote repository

use super::poisoned;
use async_trait::async_trait;
use governance_application::{StoreError, VoteRepository};
use governance_domain::{SubjectId, UserId, Vote};
use std::collections::HashMap;
use std::sync::RwLock;

type VoteKey = (SubjectId, UserId);

/// Votes keyed by `(subject, reviewer)`; the key is the uniqueness constraint
#[derive(Default)]
pub struct InMemoryVoteRepository {
    votes: RwLock<HashMap<VoteKey, Vote>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored votes across all subjects
    pub fn len(&self) -> usize {
        self.votes.read().map(|v| v.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find_vote(
        &self,
        subject: &SubjectId,
        reviewer: &UserId,
    ) -> Result<Option<Vote>, StoreError> {
        let key = (subject.clone(), reviewer.clone());
        Ok(self.votes.read().map_err(poisoned)?.get(&key).cloned())
    }

    async fn list_votes(&self, subject: &SubjectId) -> Result<Vec<Vote>, StoreError> {
        let mut votes: Vec<Vote> = self
            .votes
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|v| &v.subject_id == subject)
            .cloned()
            .collect();
        votes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.reviewer_id.cmp(&b.reviewer_id))
        });
        Ok(votes)
    }

    async fn insert_vote(&self, vote: Vote) -> Result<(), StoreError> {
        let key = (vote.subject_id.clone(), vote.reviewer_id.clone());
        let mut votes = self.votes.write().map_err(poisoned)?;
        if votes.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "{} already voted on {}",
                vote.reviewer_id, vote.subject_id
            )));
        }
        votes.insert(key, vote);
        Ok(())
    }

    async fn update_vote(&self, vote: Vote) -> Result<(), StoreError> {
        let key = (vote.subject_id.clone(), vote.reviewer_id.clone());
        let mut votes = self.votes.write().map_err(poisoned)?;
        match votes.get_mut(&key) {
            Some(slot) => {
                *slot = vote;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!(
                "vote of {} on {}",
                vote.reviewer_id, vote.subject_id
            ))),
        }
    }

    async fn delete_vote(&self, subject: &SubjectId, reviewer: &UserId) -> Result<(), StoreError> {
        let key = (subject.clone(), reviewer.clone());
        self.votes.write().map_err(poisoned)?.remove(&key);
        Ok(())
    }
}
