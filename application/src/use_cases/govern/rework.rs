//! Rejection rework
//!
//! A rejected post goes back to its author as a draft. Resubmitting it
//! creates a brand-new pending subject: old votes stay on the old id as
//! history and never count toward the new quorum.

use super::{GovernanceEngine, GovernanceError};
use crate::ports::audit_logger::AuditEvent;
use governance_domain::{Subject, SubjectId, UserId};
use serde_json::json;
use tracing::info;

impl GovernanceEngine {
    /// Resubmit a rejected (or drafted) post with new content.
    ///
    /// Returns the new pending subject.
    pub async fn resubmit(
        &self,
        subject_id: &SubjectId,
        requester_id: &UserId,
        content: impl Into<String>,
    ) -> Result<Subject, GovernanceError> {
        let _guard = self.locks.acquire(subject_id).await;
        let previous = self.load_subject(subject_id).await?;

        if !previous.is_authored_by(requester_id) {
            return Err(GovernanceError::NotAuthor);
        }

        let new_id = self.subjects.next_subject_id(&previous.kind).await?;
        let fresh = previous.rework(new_id, content)?;
        self.subjects.insert_subject(fresh.clone()).await?;

        info!(previous = %previous.id, subject = %fresh.id, "Post resubmitted for review");
        self.audit.log(AuditEvent::new(
            "subject_resubmitted",
            json!({
                "previous": previous.id,
                "subject": fresh.id,
                "author": fresh.author_id,
            }),
        ));

        Ok(fresh)
    }
}
