//! Issue operations: validation, id assignment and timestamps on top of a store.

use crate::clock::{Clock, SystemClock};
use crate::domain::{Issue, IssuePatch, NewIssue};
use crate::error::IssueError;
use crate::filter::Filters;
use crate::id::generate_id;
use crate::storage::IssueStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Executes create/list/update/delete against an [`IssueStore`].
pub struct IssueService<S> {
    storage: S,
    clock: Arc<dyn Clock>,
}

impl<S: IssueStore> IssueService<S> {
    /// Service stamping issues with the system clock.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: S, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Issues of `project` matching every filter, in insertion order.
    pub fn list(&self, project: &str, filters: &Filters) -> Vec<Issue> {
        let issues: Vec<Issue> = self
            .storage
            .list_project(project)
            .into_iter()
            .filter(|issue| filters.matches(issue))
            .collect();
        debug!(
            project,
            filters = filters.len(),
            matched = issues.len(),
            "Listed issues"
        );
        issues
    }

    /// Create an open issue in `project`.
    ///
    /// # Errors
    ///
    /// [`IssueError::RequiredFieldsMissing`] if `issue_title`, `issue_text`
    /// or `created_by` is absent or empty.
    pub fn create(&self, project: &str, new: NewIssue) -> Result<Issue, IssueError> {
        let fields = new.validate().ok_or(IssueError::RequiredFieldsMissing)?;
        let now = self.clock.now();

        let mut issue = Issue::new(generate_id(), fields, now);
        while !self.storage.append(project, issue.clone()) {
            debug!(id = %issue.id, "Generated id already in use, retrying");
            issue.id = generate_id();
        }

        info!(project, id = %issue.id, "Created issue");
        Ok(issue)
    }

    /// Merge the supplied fields of `patch` into the issue it names.
    ///
    /// Returns the `_id` of the updated issue.
    pub fn update(&self, project: &str, patch: IssuePatch) -> Result<String, IssueError> {
        let id = patch.target().ok_or(IssueError::MissingId)?.to_string();
        if !patch.has_changes() {
            return Err(IssueError::NoUpdateFields { id });
        }

        let now = self.clock.now();
        let updated = self.storage.modify(project, &id, |issue| {
            patch.apply_to(issue);
            issue.updated_on = now;
        });

        match updated {
            Some(_) => {
                info!(project, id = %id, "Updated issue");
                Ok(id)
            }
            None => {
                debug!(project, id = %id, "Update target not found");
                Err(IssueError::CouldNotUpdate { id })
            }
        }
    }

    /// Remove the issue with `id` from `project`.
    ///
    /// Returns the `_id` of the deleted issue.
    pub fn delete(&self, project: &str, id: Option<&str>) -> Result<String, IssueError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(IssueError::MissingId)?
            .to_string();

        match self.storage.remove(project, &id) {
            Some(_) => {
                info!(project, id = %id, "Deleted issue");
                Ok(id)
            }
            None => {
                debug!(project, id = %id, "Delete target not found");
                Err(IssueError::CouldNotDelete { id })
            }
        }
    }
}
