// Collection file module
// One JSON array per file, always read and written as a whole

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use super::StoreError;
use crate::model::{self, Record};

/// A JSON array of `T` persisted in a single file
#[derive(Debug)]
pub struct Collection<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
    #[cfg(test)]
    fail_writes: AtomicBool,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
            #[cfg(test)]
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing or blank file is an empty collection.
    pub fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with `records`, pretty-printed with 2-space indent
    pub fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        #[cfg(test)]
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: io::Error::other("writes disabled"),
            });
        }

        let content =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Make every following `save_all` fail without touching the file
    #[cfg(test)]
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Record,
{
    /// Id for a record about to be appended to `records`
    pub fn next_id(&self, records: &[T]) -> Result<u64, StoreError> {
        model::next_id(records).ok_or_else(|| StoreError::IdsExhausted {
            path: self.path.clone(),
        })
    }
}
