//! Content mutator backed by the in-memory subject store

use super::InMemorySubjectRepository;
use async_trait::async_trait;
use governance_application::{ContentMutator, StoreError, SubjectRepository};
use governance_domain::{Subject, SubjectKind, SubjectStatus, Verdict};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Applies verdicts to subjects held in an [`InMemorySubjectRepository`]
///
/// | Kind         | APPROVED                          | REJECTED      |
/// |--------------|-----------------------------------|---------------|
/// | Post         | stays APPROVED (published)        | moved to DRAFT |
/// | Enrichment   | published post's content replaced | no change     |
/// | Contribution | accepted                          | no change     |
pub struct StoreContentMutator {
    subjects: Arc<InMemorySubjectRepository>,
}

impl StoreContentMutator {
    pub fn new(subjects: Arc<InMemorySubjectRepository>) -> Self {
        Self { subjects }
    }
}

#[async_trait]
impl ContentMutator for StoreContentMutator {
    async fn apply(&self, subject: &Subject, verdict: Verdict) -> Result<(), StoreError> {
        match (&subject.kind, verdict) {
            (SubjectKind::Post, Verdict::Approved) => {
                info!(post = %subject.id, "Post published");
            }
            (SubjectKind::Post, Verdict::Rejected) => {
                let moved = self
                    .subjects
                    .compare_and_set_status(
                        &subject.id,
                        SubjectStatus::Rejected,
                        SubjectStatus::Draft,
                    )
                    .await?;
                debug!(post = %subject.id, moved, "Rejected post returned to draft");
            }
            (SubjectKind::Enrichment { post_id }, Verdict::Approved) => {
                let replaced = self.subjects.replace_post_content(
                    post_id,
                    &subject.community_id,
                    &subject.content,
                )?;
                if replaced {
                    info!(post = %post_id, enrichment = %subject.id, "Post content replaced by enrichment");
                } else {
                    warn!(post = %post_id, enrichment = %subject.id, "Target is not a published post of this community, content unchanged");
                }
            }
            (SubjectKind::Contribution, Verdict::Approved) => {
                info!(contribution = %subject.id, "Contribution accepted");
            }
            (_, Verdict::Rejected) => {
                debug!(subject = %subject.id, kind = %subject.kind, "Rejected, content unchanged");
            }
        }
        Ok(())
    }
}
