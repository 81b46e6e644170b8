//! Subject entities and status

use crate::core::error::DomainError;
use crate::core::ids::{CommunityId, SubjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubjectStatus {
    /// Collecting votes
    #[default]
    Pending,
    /// Accepted by the community (terminal)
    Approved,
    /// Refused by the community (terminal)
    Rejected,
    /// A rejected post sent back to its author for rework
    Draft,
}

impl SubjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectStatus::Pending => "PENDING",
            SubjectStatus::Approved => "APPROVED",
            SubjectStatus::Rejected => "REJECTED",
            SubjectStatus::Draft => "DRAFT",
        }
    }

    /// Whether no further votes may change this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubjectStatus::Approved | SubjectStatus::Rejected)
    }

    /// Whether votes are still accepted
    pub fn is_open(&self) -> bool {
        matches!(self, SubjectStatus::Pending)
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SubjectStatus::Pending),
            "APPROVED" | "PUBLISHED" => Ok(SubjectStatus::Approved),
            "REJECTED" => Ok(SubjectStatus::Rejected),
            "DRAFT" => Ok(SubjectStatus::Draft),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// What kind of content a subject is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubjectKind {
    /// A new post awaiting publication
    Post,
    /// A proposed revision of an existing post
    Enrichment {
        /// The post whose content is replaced on approval
        post_id: SubjectId,
    },
    /// Content contributed while the community was being created
    Contribution,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Post => "post",
            SubjectKind::Enrichment { .. } => "enrichment",
            SubjectKind::Contribution => "contribution",
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self, SubjectKind::Post)
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of proposed content under peer review (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    #[serde(flatten)]
    pub kind: SubjectKind,
    pub community_id: CommunityId,
    /// Owner of the subject; never allowed to vote on it
    pub author_id: UserId,
    #[serde(default)]
    pub status: SubjectStatus,
    /// Opaque payload the content mutator applies on acceptance
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Create a new pending subject
    pub fn new(
        id: impl Into<SubjectId>,
        kind: SubjectKind,
        community_id: impl Into<CommunityId>,
        author_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            community_id: community_id.into(),
            author_id: author_id.into(),
            status: SubjectStatus::Pending,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn post(
        id: impl Into<SubjectId>,
        community_id: impl Into<CommunityId>,
        author_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(id, SubjectKind::Post, community_id, author_id, content)
    }

    pub fn enrichment(
        id: impl Into<SubjectId>,
        post_id: impl Into<SubjectId>,
        community_id: impl Into<CommunityId>,
        author_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            SubjectKind::Enrichment {
                post_id: post_id.into(),
            },
            community_id,
            author_id,
            content,
        )
    }

    pub fn contribution(
        id: impl Into<SubjectId>,
        community_id: impl Into<CommunityId>,
        author_id: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(id, SubjectKind::Contribution, community_id, author_id, content)
    }

    /// Override the initial status
    pub fn with_status(mut self, status: SubjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author_id == user
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Clone a rejected (or drafted) post into a fresh pending subject.
    ///
    /// The new subject gets `new_id` and carries no vote history; the old
    /// subject is left untouched.
    pub fn rework(
        &self,
        new_id: impl Into<SubjectId>,
        content: impl Into<String>,
    ) -> Result<Subject, DomainError> {
        if !self.kind.is_post() {
            return Err(DomainError::NotReworkable(self.kind.as_str()));
        }
        if !matches!(self.status, SubjectStatus::Rejected | SubjectStatus::Draft) {
            return Err(DomainError::NotRejected(self.status.to_string()));
        }

        Ok(Subject::post(
            new_id,
            self.community_id.clone(),
            self.author_id.clone(),
            content,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!SubjectStatus::Pending.is_terminal());
        assert!(SubjectStatus::Approved.is_terminal());
        assert!(SubjectStatus::Rejected.is_terminal());
        assert!(!SubjectStatus::Draft.is_terminal());
        assert!(SubjectStatus::Pending.is_open());
        assert!(!SubjectStatus::Draft.is_open());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("pending".parse::<SubjectStatus>().ok(), Some(SubjectStatus::Pending));
        assert_eq!("PUBLISHED".parse::<SubjectStatus>().ok(), Some(SubjectStatus::Approved));
        assert!("closed".parse::<SubjectStatus>().is_err());
    }

    #[test]
    fn test_subject_kind_serde() {
        let subject = Subject::enrichment("e-1", "p-1", "c-1", "alice", "<p>better</p>");
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json["kind"], "enrichment");
        assert_eq!(json["post_id"], "p-1");
        assert_eq!(json["status"], "PENDING");

        let back: Subject = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, SubjectKind::Enrichment { post_id: "p-1".into() });
    }

    #[test]
    fn test_new_subject_is_pending() {
        let subject = Subject::post("p-1", "c-1", "alice", "hello");
        assert_eq!(subject.status, SubjectStatus::Pending);
        assert!(subject.is_authored_by(&"alice".into()));
        assert!(!subject.is_authored_by(&"bob".into()));
    }

    #[test]
    fn test_rework_rejected_post() {
        let rejected = Subject::post("p-1", "c-1", "alice", "v1")
            .with_status(SubjectStatus::Draft);
        let fresh = rejected.rework("p-2", "v2").unwrap();

        assert_eq!(fresh.id, SubjectId::from("p-2"));
        assert_eq!(fresh.status, SubjectStatus::Pending);
        assert_eq!(fresh.content, "v2");
        assert_eq!(fresh.author_id, rejected.author_id);
        assert_eq!(fresh.community_id, rejected.community_id);
    }

    #[test]
    fn test_rework_requires_rejected_post() {
        let pending = Subject::post("p-1", "c-1", "alice", "v1");
        assert!(matches!(
            pending.rework("p-2", "v2"),
            Err(DomainError::NotRejected(_))
        ));

        let contribution = Subject::contribution("k-1", "c-1", "alice", "v1")
            .with_status(SubjectStatus::Rejected);
        assert_eq!(
            contribution.rework("k-2", "v2"),
            Err(DomainError::NotReworkable("contribution"))
        );
    }
}
