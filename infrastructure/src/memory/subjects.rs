//! In-memory subject repository

use super::poisoned;
use async_trait::async_trait;
use governance_application::{StoreError, SubjectRepository};
use governance_domain::{CommunityId, Subject, SubjectId, SubjectKind, SubjectStatus};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Subjects held in a `RwLock<HashMap>`
///
/// Every status write goes through [`compare_and_set_status`], which checks
/// and writes under one write lock.
///
/// [`compare_and_set_status`]: SubjectRepository::compare_and_set_status
#[derive(Default)]
pub struct InMemorySubjectRepository {
    subjects: RwLock<HashMap<SubjectId, Subject>>,
    sequence: AtomicU64,
}

impl InMemorySubjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content of a published post of `community`.
    ///
    /// Returns `Ok(false)` without writing when the target is not an
    /// `APPROVED` post of that community.
    pub fn replace_post_content(
        &self,
        id: &SubjectId,
        community: &CommunityId,
        content: &str,
    ) -> Result<bool, StoreError> {
        let mut subjects = self.subjects.write().map_err(poisoned)?;
        let post = subjects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("subject {id}")))?;
        if !post.kind.is_post()
            || post.status != SubjectStatus::Approved
            || &post.community_id != community
        {
            return Ok(false);
        }
        post.content = content.to_string();
        Ok(true)
    }

    /// Snapshot of one subject
    pub fn get(&self, id: &SubjectId) -> Option<Subject> {
        self.subjects.read().ok()?.get(id).cloned()
    }

    /// Snapshot of all subjects, ordered by id
    pub fn all(&self) -> Vec<Subject> {
        let mut all: Vec<Subject> = self
            .subjects
            .read()
            .map(|s| s.values().cloned().collect())
            .unwrap_or_default();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn load_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StoreError> {
        Ok(self.subjects.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn insert_subject(&self, subject: Subject) -> Result<(), StoreError> {
        let mut subjects = self.subjects.write().map_err(poisoned)?;
        if subjects.contains_key(&subject.id) {
            return Err(StoreError::Conflict(format!("subject {} exists", subject.id)));
        }
        subjects.insert(subject.id.clone(), subject);
        Ok(())
    }

    async fn compare_and_set_status(
        &self,
        id: &SubjectId,
        expected: SubjectStatus,
        next: SubjectStatus,
    ) -> Result<bool, StoreError> {
        let mut subjects = self.subjects.write().map_err(poisoned)?;
        let subject = subjects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("subject {id}")))?;
        if subject.status != expected {
            return Ok(false);
        }
        subject.status = next;
        Ok(true)
    }

    async fn next_subject_id(&self, kind: &SubjectKind) -> Result<SubjectId, StoreError> {
        let subjects = self.subjects.read().map_err(poisoned)?;
        loop {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            let id = SubjectId::new(format!("{}-{n}", kind.as_str()));
            if !subjects.contains_key(&id) {
                return Ok(id);
            }
        }
    }
}
