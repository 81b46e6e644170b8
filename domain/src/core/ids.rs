//! Identifier value objects
//!
//! Identifiers are opaque strings supplied by the surrounding application.
//! Each kind gets its own newtype so a reviewer id can never be passed where
//! a subject id is expected.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// A platform user (author, reviewer, community creator)
    UserId
);

string_id!(
    /// A community; scopes which contributor pool votes on a subject
    CommunityId
);

string_id!(
    /// A subject under review (post, enrichment or contribution)
    SubjectId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_and_compare() {
        let a = UserId::from("alice");
        assert_eq!(a.to_string(), "alice");
        assert_eq!(a, UserId::new("alice".to_string()));
        assert_ne!(a, UserId::from("bob"));
    }

    #[test]
    fn test_ids_serialize_transparent() {
        let id = SubjectId::from("post-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"post-1\"");
        let back: SubjectId = serde_json::from_str("\"post-1\"").unwrap();
        assert_eq!(back, id);
    }
}
