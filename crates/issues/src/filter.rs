//! List filtering over a fixed set of issue fields.
//!
//! A filter is a `field=value` pair taken from the query string. An issue
//! matches when, for every filter, the stringified field equals the expected
//! value ignoring case. Field names outside [`IssueField`] never match.

use crate::domain::Issue;
use chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;

/// The fields a list request can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueField {
    Id,
    IssueTitle,
    IssueText,
    CreatedBy,
    AssignedTo,
    StatusText,
    Open,
    CreatedOn,
    UpdatedOn,
}

impl IssueField {
    pub const ALL: [IssueField; 9] = [
        IssueField::Id,
        IssueField::IssueTitle,
        IssueField::IssueText,
        IssueField::CreatedBy,
        IssueField::AssignedTo,
        IssueField::StatusText,
        IssueField::Open,
        IssueField::CreatedOn,
        IssueField::UpdatedOn,
    ];

    /// Look up a field by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            IssueField::Id => "_id",
            IssueField::IssueTitle => "issue_title",
            IssueField::IssueText => "issue_text",
            IssueField::CreatedBy => "created_by",
            IssueField::AssignedTo => "assigned_to",
            IssueField::StatusText => "status_text",
            IssueField::Open => "open",
            IssueField::CreatedOn => "created_on",
            IssueField::UpdatedOn => "updated_on",
        }
    }

    /// The field's value as a string, in the same form it takes in JSON.
    pub fn value_of(self, issue: &Issue) -> Cow<'_, str> {
        match self {
            IssueField::Id => Cow::Borrowed(&issue.id),
            IssueField::IssueTitle => Cow::Borrowed(&issue.issue_title),
            IssueField::IssueText => Cow::Borrowed(&issue.issue_text),
            IssueField::CreatedBy => Cow::Borrowed(&issue.created_by),
            IssueField::AssignedTo => Cow::Borrowed(&issue.assigned_to),
            IssueField::StatusText => Cow::Borrowed(&issue.status_text),
            IssueField::Open => Cow::Borrowed(if issue.open { "true" } else { "false" }),
            IssueField::CreatedOn => Cow::Owned(timestamp(&issue.created_on)),
            IssueField::UpdatedOn => Cow::Owned(timestamp(&issue.updated_on)),
        }
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Criterion {
    name: String,
    field: Option<IssueField>,
    /// Lowercased expected value
    expected: String,
}

impl Criterion {
    fn matches(&self, issue: &Issue) -> bool {
        match self.field {
            Some(field) => field.value_of(issue).to_lowercase() == self.expected,
            None => false,
        }
    }
}

/// A conjunction of field filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    criteria: Vec<Criterion>,
}

impl Filters {
    /// An empty filter set, matching every issue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from query-string pairs. A repeated name keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |filters, (name, value)| filters.with(name, value))
    }

    /// Add (or replace) the filter for `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        let name = name.into();
        let criterion = Criterion {
            field: IssueField::from_name(&name),
            expected: value.as_ref().to_lowercase(),
            name,
        };
        match self.criteria.iter_mut().find(|c| c.name == criterion.name) {
            Some(existing) => *existing = criterion,
            None => self.criteria.push(criterion),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True if `issue` satisfies every filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria.iter().all(|c| c.matches(issue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequiredFields;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn issue(assigned_to: &str, open: bool) -> Issue {
        let mut issue = Issue::new(
            "0123456789abcdef0123456789abcdef".into(),
            RequiredFields {
                issue_title: "Broken Build".into(),
                issue_text: "CI fails".into(),
                created_by: "Alice".into(),
                assigned_to: assigned_to.into(),
                status_text: String::new(),
            },
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        );
        issue.open = open;
        issue
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in IssueField::ALL {
            assert_eq!(IssueField::from_name(field.name()), Some(field));
        }
        assert_eq!(IssueField::from_name("priority"), None);
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(Filters::new().matches(&issue("", true)));
    }

    #[test]
    fn test_open_filter_is_case_insensitive() {
        let filters = Filters::new().with("open", "TRUE");
        assert!(filters.matches(&issue("", true)));
        assert!(!filters.matches(&issue("", false)));
    }

    #[test]
    fn test_multiple_filters_intersect() {
        let filters = Filters::from_pairs([("open", "true"), ("assigned_to", "bob")]);
        assert!(filters.matches(&issue("Bob", true)));
        assert!(!filters.matches(&issue("Bob", false)));
        assert!(!filters.matches(&issue("Carol", true)));
    }

    #[test]
    fn test_unknown_field_matches_nothing() {
        let filters = Filters::new().with("priority", "high");
        assert!(!filters.matches(&issue("", true)));
    }

    #[test]
    fn test_repeated_name_keeps_last_value() {
        let filters = Filters::from_pairs([("assigned_to", "carol"), ("assigned_to", "bob")]);
        assert_eq!(filters.len(), 1);
        assert!(filters.matches(&issue("Bob", true)));
    }

    #[test]
    fn test_timestamp_filter_uses_json_form() {
        let issue = issue("", true);
        let json = serde_json::to_value(&issue).unwrap();
        let created = json["created_on"].as_str().unwrap();

        assert_eq!(created, "2024-03-01T12:30:00Z");
        assert!(Filters::new().with("created_on", created).matches(&issue));
    }

    proptest! {
        #[test]
        fn prop_title_matches_any_casing(title in "[a-zA-Z0-9 ]{1,20}", upper in any::<bool>()) {
            let mut subject = issue("", true);
            subject.issue_title = title.clone();
            let query = if upper { title.to_uppercase() } else { title.to_lowercase() };
            prop_assert!(Filters::new().with("issue_title", query).matches(&subject));
        }

        #[test]
        fn prop_filter_on_different_text_never_matches(a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
            prop_assume!(a != b);
            let subject = issue(&a, true);
            prop_assert!(!Filters::new().with("assigned_to", b).matches(&subject));
        }
    }
}
