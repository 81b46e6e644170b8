//! In-process port doubles shared by the engine tests

use super::GovernanceEngine;
use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::content_mutator::ContentMutator;
use crate::ports::contributor_pool::ContributorPool;
use crate::ports::notifier::{GovernanceNotifier, NotifyError};
use crate::ports::store::StoreError;
use crate::ports::subject_repository::SubjectRepository;
use crate::ports::vote_repository::VoteRepository;
use async_trait::async_trait;
use governance_domain::{
    CommunityId, GovernancePolicy, Subject, SubjectId, SubjectKind, SubjectStatus, UserId,
    Verdict, Vote,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const AUTHOR: &str = "author";
pub const CREATOR: &str = "creator";
pub const COMMUNITY: &str = "c-1";

fn unavailable(what: &str) -> StoreError {
    StoreError::Unavailable(format!("{what}: connection reset"))
}

#[derive(Default)]
pub struct MockSubjects {
    subjects: Mutex<HashMap<SubjectId, Subject>>,
    next_id: AtomicUsize,
    fail_status_writes: AtomicBool,
}

impl MockSubjects {
    pub fn fail_status_writes(&self, fail: bool) {
        self.fail_status_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SubjectRepository for MockSubjects {
    async fn load_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StoreError> {
        Ok(self.subjects.lock().unwrap().get(id).cloned())
    }

    async fn insert_subject(&self, subject: Subject) -> Result<(), StoreError> {
        let mut subjects = self.subjects.lock().unwrap();
        if subjects.contains_key(&subject.id) {
            return Err(StoreError::Conflict(subject.id.to_string()));
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
        if self.fail_status_writes.load(Ordering::SeqCst) {
            return Err(unavailable("status write"));
        }
        let mut subjects = self.subjects.lock().unwrap();
        let subject = subjects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if subject.status != expected {
            return Ok(false);
        }
        subject.status = next;
        Ok(true)
    }

    async fn next_subject_id(&self, kind: &SubjectKind) -> Result<SubjectId, StoreError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SubjectId::new(format!("{}-new-{n}", kind.as_str())))
    }
}

#[derive(Default)]
pub struct MockVotes {
    votes: Mutex<Vec<Vote>>,
    fail_reads: AtomicBool,
}

impl MockVotes {
    pub fn insert_for_test(&self, vote: Vote) {
        self.votes.lock().unwrap().push(vote);
    }

    /// Make `list_votes` fail; single-vote lookups keep working
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl VoteRepository for MockVotes {
    async fn find_vote(
        &self,
        subject: &SubjectId,
        reviewer: &UserId,
    ) -> Result<Option<Vote>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| &v.subject_id == subject && &v.reviewer_id == reviewer)
            .cloned())
    }

    async fn list_votes(&self, subject: &SubjectId) -> Result<Vec<Vote>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable("vote scan"));
        }
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| &v.subject_id == subject)
            .cloned()
            .collect())
    }

    async fn insert_vote(&self, vote: Vote) -> Result<(), StoreError> {
        let mut votes = self.votes.lock().unwrap();
        if votes
            .iter()
            .any(|v| v.subject_id == vote.subject_id && v.reviewer_id == vote.reviewer_id)
        {
            return Err(StoreError::Conflict("duplicate vote".into()));
        }
        votes.push(vote);
        Ok(())
    }

    async fn update_vote(&self, vote: Vote) -> Result<(), StoreError> {
        let mut votes = self.votes.lock().unwrap();
        let slot = votes
            .iter_mut()
            .find(|v| v.subject_id == vote.subject_id && v.reviewer_id == vote.reviewer_id)
            .ok_or_else(|| StoreError::NotFound("vote".into()))?;
        *slot = vote;
        Ok(())
    }

    async fn delete_vote(&self, subject: &SubjectId, reviewer: &UserId) -> Result<(), StoreError> {
        self.votes
            .lock()
            .unwrap()
            .retain(|v| !(&v.subject_id == subject && &v.reviewer_id == reviewer));
        Ok(())
    }
}

pub struct MockPool {
    creator: UserId,
    contributors: HashSet<UserId>,
    fail_counts: AtomicBool,
}

impl MockPool {
    /// Make `eligible_count` fail; eligibility checks keep working
    pub fn fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContributorPool for MockPool {
    async fn eligible_count(
        &self,
        _community: &CommunityId,
        excluding: &UserId,
    ) -> Result<usize, StoreError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(unavailable("pool count"));
        }
        let mut pool: HashSet<&UserId> = self.contributors.iter().collect();
        pool.insert(&self.creator);
        pool.remove(excluding);
        Ok(pool.len())
    }

    async fn is_eligible(
        &self,
        _community: &CommunityId,
        user: &UserId,
    ) -> Result<bool, StoreError> {
        Ok(user == &self.creator || self.contributors.contains(user))
    }
}

#[derive(Default)]
pub struct RecordingMutator {
    applied: Mutex<Vec<(String, Verdict)>>,
    fail: AtomicBool,
}

impl RecordingMutator {
    pub fn calls(&self) -> usize {
        self.applied.lock().unwrap().len()
    }

    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentMutator for RecordingMutator {
    async fn apply(&self, subject: &Subject, verdict: Verdict) -> Result<(), StoreError> {
        self.applied
            .lock()
            .unwrap()
            .push((subject.id.to_string(), verdict));
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Other("content table locked".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    decisions: AtomicUsize,
    received: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn decisions(&self) -> usize {
        self.decisions.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn result(&self) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(NotifyError::DeliveryFailed("push gateway down".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GovernanceNotifier for RecordingNotifier {
    async fn notify_decision(
        &self,
        _subject: &Subject,
        _verdict: Verdict,
        _votes: &[Vote],
    ) -> Result<(), NotifyError> {
        self.decisions.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn notify_vote_received(
        &self,
        _subject: &Subject,
        _vote: &Vote,
    ) -> Result<(), NotifyError> {
        self.received.fetch_add(1, Ordering::SeqCst);
        self.result()
    }
}

#[derive(Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingAudit {
    pub fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAudit {
    fn log(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

/// Engine wired to doubles; the community creator is `AUTHOR` unless
/// built with [`Harness::build`].
pub struct Harness {
    pub engine: GovernanceEngine,
    pub subjects: Arc<MockSubjects>,
    pub votes: Arc<MockVotes>,
    pub pool: Arc<MockPool>,
    pub mutator: Arc<RecordingMutator>,
    pub notifier: Arc<RecordingNotifier>,
    pub audit: Arc<RecordingAudit>,
}

impl Harness {
    pub fn new(reviewers: &[&str]) -> Self {
        Self::build(reviewers, AUTHOR, GovernancePolicy::default())
    }

    pub fn with_policy(reviewers: &[&str], policy: GovernancePolicy) -> Self {
        Self::build(reviewers, AUTHOR, policy)
    }

    pub fn build(reviewers: &[&str], creator: &str, policy: GovernancePolicy) -> Self {
        let subjects = Arc::new(MockSubjects::default());
        let votes = Arc::new(MockVotes::default());
        let pool = Arc::new(MockPool {
            creator: UserId::from(creator),
            contributors: reviewers.iter().map(|r| UserId::from(*r)).collect(),
            fail_counts: AtomicBool::new(false),
        });
        let mutator = Arc::new(RecordingMutator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let audit = Arc::new(RecordingAudit::default());

        let engine = GovernanceEngine::new(
            subjects.clone(),
            votes.clone(),
            pool.clone(),
            mutator.clone(),
        )
        .with_notifier(notifier.clone())
        .with_audit_logger(audit.clone())
        .with_policy(policy);

        Self {
            engine,
            subjects,
            votes,
            pool,
            mutator,
            notifier,
            audit,
        }
    }

    pub fn add(&self, subject: Subject) {
        self.subjects
            .subjects
            .lock()
            .unwrap()
            .insert(subject.id.clone(), subject);
    }

    pub fn add_post(&self, id: &str) {
        self.add(Subject::post(id, COMMUNITY, AUTHOR, format!("content of {id}")));
    }

    pub fn subject(&self, id: &str) -> Subject {
        self.subjects.subjects.lock().unwrap()[&SubjectId::from(id)].clone()
    }

    pub fn status(&self, id: &str) -> SubjectStatus {
        self.subject(id).status
    }

    pub fn votes_for(&self, id: &str) -> Vec<Vote> {
        let id = SubjectId::from(id);
        self.votes
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.subject_id == id)
            .cloned()
            .collect()
    }

    pub fn vote_count(&self, id: &str) -> usize {
        self.votes_for(id).len()
    }

    pub fn mutations(&self) -> Vec<(String, Verdict)> {
        self.mutator.applied.lock().unwrap().clone()
    }
}
