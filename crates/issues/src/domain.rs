//! Core data structures for the issue tracker.
//!
//! - [`Issue`]: the stored record, serialized with the wire field names
//! - [`NewIssue`]: the fields a client may submit on create
//! - [`IssuePatch`]: the whitelist of fields a client may change on update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single issue record.
///
/// Every non-timestamp field is always present; optional fields default to
/// the empty string and `open` defaults to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier, never changes
    #[serde(rename = "_id")]
    pub id: String,
    pub issue_title: String,
    pub issue_text: String,
    /// Set once at creation
    pub created_on: DateTime<Utc>,
    /// Refreshed by every update
    pub updated_on: DateTime<Utc>,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
}

impl Issue {
    /// Build a fresh open issue stamped with `now`.
    pub fn new(id: String, fields: RequiredFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            issue_title: fields.issue_title,
            issue_text: fields.issue_text,
            created_on: now,
            updated_on: now,
            created_by: fields.created_by,
            assigned_to: fields.assigned_to,
            status_text: fields.status_text,
            open: true,
        }
    }
}

/// Create request body.
///
/// All fields are optional at the parsing stage so that a missing required
/// field is reported as a validation error rather than a parse failure.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewIssue {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

/// A [`NewIssue`] whose required fields were all supplied and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

impl NewIssue {
    /// Check the required fields, returning `None` if any is missing or empty.
    pub fn validate(self) -> Option<RequiredFields> {
        Some(RequiredFields {
            issue_title: non_empty(self.issue_title)?,
            issue_text: non_empty(self.issue_text)?,
            created_by: non_empty(self.created_by)?,
            assigned_to: self.assigned_to.unwrap_or_default(),
            status_text: self.status_text.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Update request body.
///
/// Only the fields listed here are ever merged into a stored issue. `_id`
/// selects the issue and is never written; `created_on`, `updated_on` and
/// unknown keys are ignored. JSON `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssuePatch {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    #[serde(deserialize_with = "deserialize_open")]
    pub open: Option<bool>,
}

impl IssuePatch {
    /// Start a patch targeting `id`.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// The selecting `_id`, if present and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// True if at least one mutable field was supplied.
    pub fn has_changes(&self) -> bool {
        self.issue_title.is_some()
            || self.issue_text.is_some()
            || self.created_by.is_some()
            || self.assigned_to.is_some()
            || self.status_text.is_some()
            || self.open.is_some()
    }

    /// Overwrite the supplied fields of `issue`, leaving the rest untouched.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(v) = &self.issue_title {
            issue.issue_title = v.clone();
        }
        if let Some(v) = &self.issue_text {
            issue.issue_text = v.clone();
        }
        if let Some(v) = &self.created_by {
            issue.created_by = v.clone();
        }
        if let Some(v) = &self.assigned_to {
            issue.assigned_to = v.clone();
        }
        if let Some(v) = &self.status_text {
            issue.status_text = v.clone();
        }
        if let Some(v) = self.open {
            issue.open = v;
        }
    }
}

/// Delete request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssueRef {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

impl IssueRef {
    /// The `_id`, if present and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// `open` arrives as a JSON boolean or, from form bodies, as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum OpenFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_open<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<OpenFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(OpenFlag::Bool(b)) => Ok(Some(b)),
        Some(OpenFlag::Text(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(OpenFlag::Text(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(OpenFlag::Text(s)) => Err(serde::de::Error::custom(format!(
            "invalid value for open: '{}' (expected true or false)",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_issue() -> Issue {
        let fields = NewIssue {
            issue_title: Some("Title".into()),
            issue_text: Some("Text".into()),
            created_by: Some("Alice".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        Issue::new("abc".into(), fields, Utc::now())
    }

    #[test]
    fn test_issue_serializes_wire_names() {
        let issue = sample_issue();
        let value = serde_json::to_value(&issue).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "_id",
            "issue_title",
            "issue_text",
            "created_on",
            "updated_on",
            "created_by",
            "assigned_to",
            "status_text",
            "open",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj.len(), 9);
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["assigned_to"], "");
        assert_eq!(value["open"], true);
    }

    #[test]
    fn test_validate_rejects_empty_required_field() {
        let new = NewIssue {
            issue_title: Some("".into()),
            issue_text: Some("Text".into()),
            created_by: Some("Alice".into()),
            ..Default::default()
        };
        assert!(new.validate().is_none());
    }

    #[test]
    fn test_validate_rejects_missing_required_field() {
        let new = NewIssue {
            issue_text: Some("Text".into()),
            created_by: Some("Alice".into()),
            ..Default::default()
        };
        assert!(new.validate().is_none());
    }

    #[test]
    fn test_patch_ignores_unknown_and_protected_keys() {
        let patch: IssuePatch = serde_json::from_value(json!({
            "_id": "abc",
            "created_on": "2001-01-01T00:00:00Z",
            "priority": "high"
        }))
        .unwrap();
        assert_eq!(patch.target(), Some("abc"));
        assert!(!patch.has_changes());
    }

    #[test]
    fn test_patch_null_is_absent() {
        let patch: IssuePatch =
            serde_json::from_value(json!({"_id": "abc", "issue_title": null, "open": null}))
                .unwrap();
        assert!(!patch.has_changes());
    }

    #[test]
    fn test_patch_open_accepts_bool_and_string() {
        let from_bool: IssuePatch =
            serde_json::from_value(json!({"_id": "a", "open": false})).unwrap();
        assert_eq!(from_bool.open, Some(false));

        let from_text: IssuePatch =
            serde_json::from_value(json!({"_id": "a", "open": "FALSE"})).unwrap();
        assert_eq!(from_text.open, Some(false));

        let bad = serde_json::from_value::<IssuePatch>(json!({"_id": "a", "open": "maybe"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_apply_overwrites_only_supplied_fields() {
        let mut issue = sample_issue();
        let before = issue.clone();

        let patch = IssuePatch {
            issue_title: Some("New title".into()),
            open: Some(false),
            ..IssuePatch::for_id("abc")
        };
        patch.apply_to(&mut issue);

        assert_eq!(issue.issue_title, "New title");
        assert!(!issue.open);
        assert_eq!(issue.id, before.id);
        assert_eq!(issue.issue_text, before.issue_text);
        assert_eq!(issue.created_on, before.created_on);
        assert_eq!(issue.updated_on, before.updated_on);
    }

    #[test]
    fn test_empty_id_is_no_target() {
        assert_eq!(IssuePatch::for_id("").target(), None);
        assert_eq!(IssueRef { id: Some(String::new()) }.target(), None);
        assert_eq!(IssueRef::default().target(), None);
    }
}
