//! In-memory storage backend.
//!
//! All data lives in a `HashMap` of project name to issue sequence and is lost
//! when the last clone is dropped. Each instance is isolated, so every test
//! can build its own store.

use crate::domain::Issue;
use crate::storage::IssueStore;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<String, Vec<Issue>>,
    /// Every `_id` in use, across all projects
    ids: HashSet<String>,
}

/// In-memory storage backend.
///
/// Uses `Arc<RwLock<>>` for shared interior mutability: clones share the same
/// data, and each mutation holds the write lock for its whole duration.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage instance.
    pub fn new() -> Self {
        Self::default()
    }

    // Writes are single push/assign/remove steps, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl IssueStore for InMemoryStorage {
    fn list_project(&self, project: &str) -> Vec<Issue> {
        self.read()
            .projects
            .get(project)
            .cloned()
            .unwrap_or_default()
    }

    fn find(&self, project: &str, id: &str) -> Option<Issue> {
        self.read()
            .projects
            .get(project)?
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
    }

    fn append(&self, project: &str, issue: Issue) -> bool {
        let mut inner = self.write();
        if !inner.ids.insert(issue.id.clone()) {
            return false;
        }
        inner
            .projects
            .entry(project.to_string())
            .or_default()
            .push(issue);
        true
    }

    fn modify<F>(&self, project: &str, id: &str, f: F) -> Option<Issue>
    where
        F: FnOnce(&mut Issue),
    {
        let mut inner = self.write();
        let issue = inner
            .projects
            .get_mut(project)?
            .iter_mut()
            .find(|issue| issue.id == id)?;

        // The selector is not part of the mutable surface
        let original_id = issue.id.clone();
        f(issue);
        issue.id = original_id;

        Some(issue.clone())
    }

    fn remove(&self, project: &str, id: &str) -> Option<Issue> {
        let mut inner = self.write();
        let issues = inner.projects.get_mut(project)?;
        let index = issues.iter().position(|issue| issue.id == id)?;
        let removed = issues.remove(index);
        inner.ids.remove(&removed.id);
        Some(removed)
    }

    fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().projects.keys().cloned().collect();
        names.sort();
        names
    }

    fn issue_count(&self) -> usize {
        self.read().ids.len()
    }
}
