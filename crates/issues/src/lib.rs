//! Project-scoped issue tracking library
//!
//! This library provides the issue model, the storage abstraction with its
//! in-memory backend, and the service layer that validates and applies
//! create/list/update/delete requests. The HTTP server is built on top of it.

pub mod clock;
pub mod domain;
pub mod error;
pub mod filter;
pub mod id;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::{Issue, IssuePatch, IssueRef, NewIssue, RequiredFields};
pub use error::IssueError;
pub use filter::{Filters, IssueField};
pub use service::IssueService;
pub use storage::{InMemoryStorage, IssueStore};
