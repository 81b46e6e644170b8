//! Content mutator port
//!
//! Applies the content side effect of a verdict: publishing a post,
//! replacing a post's content with an accepted enrichment, or moving a
//! rejected post back to draft.

use super::store::StoreError;
use async_trait::async_trait;
use governance_domain::{Subject, Verdict};

#[async_trait]
pub trait ContentMutator: Send + Sync {
    /// Apply `verdict` to `subject`. Called once per terminal transition.
    async fn apply(&self, subject: &Subject, verdict: Verdict) -> Result<(), StoreError>;
}

/// Mutator that changes nothing beyond the status transition itself
pub struct NoContentMutation;

#[async_trait]
impl ContentMutator for NoContentMutation {
    async fn apply(&self, _subject: &Subject, _verdict: Verdict) -> Result<(), StoreError> {
        Ok(())
    }
}
