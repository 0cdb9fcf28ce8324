//! Domain model
//!
//! Records stored in the collection files and the request payloads that
//! create or modify them.

mod project;
mod task;

pub use project::{NewProject, Project};
pub use task::{NewTask, Task, TaskPatch};

use thiserror::Error;

/// A record with a collection-unique numeric id
pub trait Record {
    fn id(&self) -> u64;
}

/// Next free id: one past the largest id in the collection, 1 when empty.
///
/// `None` once the largest id is `u64::MAX`.
pub fn next_id<T: Record>(records: &[T]) -> Option<u64> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Client-side mistakes detected while validating a payload.
///
/// The display strings are the messages returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and description are required.")]
    MissingProjectFields,

    #[error("Project ID in URL and body must match.")]
    ProjectIdMismatch,

    #[error("Title, description, priority, dueDate and status are required.")]
    MissingTaskFields,

    #[error("Priority must be one of the following: high, medium, low.")]
    InvalidPriority,

    #[error("Status must be one of the following: not-started, in-progress, done.")]
    InvalidStatus,

    #[error("Cannot delete project because it has tasks.")]
    ProjectHasTasks,
}

/// Keep a string field only when it carries a value
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
