//! Flat-file storage
//!
//! Projects and tasks live in two sibling JSON files. Each mutation loads the
//! whole collection, changes it in memory and rewrites the whole file.
//! Mutating handlers serialize on [`Store::lock_writes`] so overlapping
//! read-modify-write cycles cannot drop each other's changes.

mod collection;

pub use collection::Collection;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::StorageConfig;
use crate::model::{Project, Task};

/// Failure reading or writing a collection file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed collection file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no ids left in {}", path.display())]
    IdsExhausted { path: PathBuf },
}

/// Both collections plus the writer lock
pub struct Store {
    pub projects: Collection<Project>,
    pub tasks: Collection<Task>,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(config: &StorageConfig) -> Self {
        Self::open(
            Path::new(&config.data_dir),
            &config.projects_file,
            &config.tasks_file,
        )
    }

    pub fn open(data_dir: &Path, projects_file: &str, tasks_file: &str) -> Self {
        Self {
            projects: Collection::new(data_dir.join(projects_file)),
            tasks: Collection::new(data_dir.join(tasks_file)),
            write_lock: Mutex::new(()),
        }
    }

    /// Held for the whole load → mutate → save sequence of a mutating handler
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collections_are_siblings() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path(), "projects.json", "tasks.json");
        assert_eq!(store.projects.path(), dir.path().join("projects.json"));
        assert_eq!(store.tasks.path(), dir.path().join("tasks.json"));
    }

    #[tokio::test]
    async fn test_write_lock_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path(), "projects.json", "tasks.json");
        let guard = store.lock_writes().await;
        assert!(store.write_lock.try_lock().is_err());
        drop(guard);
        assert!(store.write_lock.try_lock().is_ok());
    }
}
