//! Validation errors reported by the issue service.
//!
//! Every variant is a user input problem; the `Display` text of each variant
//! is exactly the message clients receive in the `error` field.

use thiserror::Error;

/// Errors returned by [`IssueService`](crate::IssueService) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueError {
    /// `issue_title`, `issue_text` or `created_by` is missing or empty
    #[error("required field(s) missing")]
    RequiredFieldsMissing,
    /// Update or delete request without an `_id`
    #[error("missing _id")]
    MissingId,
    /// Update request carrying nothing but the `_id`
    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },
    /// No issue with this `_id` exists in the project
    #[error("could not update")]
    CouldNotUpdate { id: String },
    /// No issue with this `_id` exists in the project
    #[error("could not delete")]
    CouldNotDelete { id: String },
}

impl IssueError {
    /// The `_id` the failed request referred to, if it carried one.
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::RequiredFieldsMissing | IssueError::MissingId => None,
            IssueError::NoUpdateFields { id }
            | IssueError::CouldNotUpdate { id }
            | IssueError::CouldNotDelete { id } => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_wire_format() {
        assert_eq!(
            IssueError::RequiredFieldsMissing.to_string(),
            "required field(s) missing"
        );
        assert_eq!(IssueError::MissingId.to_string(), "missing _id");
        assert_eq!(
            IssueError::NoUpdateFields { id: "a".into() }.to_string(),
            "no update field(s) sent"
        );
        assert_eq!(
            IssueError::CouldNotUpdate { id: "a".into() }.to_string(),
            "could not update"
        );
        assert_eq!(
            IssueError::CouldNotDelete { id: "a".into() }.to_string(),
            "could not delete"
        );
    }

    #[test]
    fn test_id_only_for_id_bearing_variants() {
        assert_eq!(IssueError::RequiredFieldsMissing.id(), None);
        assert_eq!(IssueError::MissingId.id(), None);
        assert_eq!(
            IssueError::CouldNotDelete { id: "abc".into() }.id(),
            Some("abc")
        );
    }
}
