//! Storage abstraction for project-scoped issue sequences.
//!
//! This module defines the `IssueStore` trait the service layer is written
//! against, plus the in-memory backend the server runs on.

use crate::domain::Issue;

pub mod memory;

pub use memory::InMemoryStorage;

/// Trait for storage backends holding issues grouped by project.
///
/// Within a project, issues keep insertion order; that order is the order
/// `list_project` returns. Implementations must be `Clone` with clones sharing
/// the same data, so one store can be handed to every request handler.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use issues::domain::{Issue, NewIssue};
/// use issues::storage::{InMemoryStorage, IssueStore};
///
/// let storage = InMemoryStorage::new();
/// let fields = NewIssue {
///     issue_title: Some("Fix bug".to_string()),
///     issue_text: Some("Details".to_string()),
///     created_by: Some("Alice".to_string()),
///     ..Default::default()
/// }
/// .validate()
/// .unwrap();
///
/// let issue = Issue::new("abc".to_string(), fields, Utc::now());
/// assert!(storage.append("apitest", issue));
///
/// let loaded = storage.find("apitest", "abc").unwrap();
/// assert_eq!(loaded.issue_title, "Fix bug");
/// ```
pub trait IssueStore: Clone + Send + Sync {
    /// All issues of `project` in insertion order; empty for an unknown project.
    fn list_project(&self, project: &str) -> Vec<Issue>;

    /// Find an issue by `_id` within `project`.
    fn find(&self, project: &str, id: &str) -> Option<Issue>;

    /// Append `issue` to `project`, creating the project if needed.
    ///
    /// Returns `false` without storing anything if the `_id` is already used
    /// anywhere in the store.
    fn append(&self, project: &str, issue: Issue) -> bool;

    /// Mutate the issue with `_id` in `project` in place, keeping its position.
    ///
    /// Returns the updated issue, or `None` if there is no such issue.
    fn modify<F>(&self, project: &str, id: &str, f: F) -> Option<Issue>
    where
        F: FnOnce(&mut Issue);

    /// Remove the issue with `_id` from `project`.
    fn remove(&self, project: &str, id: &str) -> Option<Issue>;

    /// Names of every project that has been written to.
    fn project_names(&self) -> Vec<String>;

    /// Total number of issues across all projects.
    fn issue_count(&self) -> usize;
}
