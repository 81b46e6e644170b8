//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid subject status: {0}")]
    InvalidStatus(String),

    #[error("Invalid vote decision: {0}")]
    InvalidDecision(String),

    #[error("Invalid tie-break policy: {0}")]
    InvalidTieBreak(String),

    #[error("Only posts can be reworked (subject is {0})")]
    NotReworkable(&'static str),

    #[error("Subject must be REJECTED or DRAFT to be reworked (status is {0})")]
    NotRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidStatus("OPEN".to_string()).to_string(),
            "Invalid subject status: OPEN"
        );
        assert_eq!(
            DomainError::NotReworkable("enrichment").to_string(),
            "Only posts can be reworked (subject is enrichment)"
        );
    }
}
