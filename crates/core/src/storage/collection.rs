//! In-memory record collections mirrored to a JSON file.
//!
//! A [`RecordCollection`] owns one `Vec` of records behind a `RwLock` and the
//! path of the file that mirrors it. Every mutation rewrites the whole file
//! while still holding the write lock, so the file always matches some
//! complete in-memory state of the collection.

use crate::content::Record;
use crate::error::Result;
use crate::storage::persistence::{read_records, write_records};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A thread-safe collection of records persisted as a single JSON array.
#[derive(Debug)]
pub struct RecordCollection<T> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T: Record> RecordCollection<T> {
    /// Loads the collection from `path`. A missing file yields an empty collection.
    pub fn load(path: PathBuf) -> Result<Self> {
        let records = read_records(&path)?;
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every record in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.records.read().clone()
    }

    /// Snapshot of the records matching `predicate`, in insertion order.
    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.records
            .read()
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }

    /// Returns the first record with the given id.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.records.read().iter().find(|r| r.id() == *id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Appends a record and rewrites the file.
    ///
    /// If the write fails the record stays in memory and the error is
    /// returned; the file catches up on the next successful write.
    pub fn insert(&self, record: T) -> Result<T> {
        let mut records = self.records.write();
        records.push(record.clone());
        write_records(&self.path, &records)?;
        Ok(record)
    }

    /// Removes the first record with the given id and rewrites the file.
    ///
    /// Returns `Ok(false)` without touching the file when no record matched.
    /// As with [`insert`](Self::insert), a failed write does not undo the removal.
    pub fn remove(&self, id: &Uuid) -> Result<bool> {
        let mut records = self.records.write();
        let Some(pos) = records.iter().position(|r| r.id() == *id) else {
            return Ok(false);
        };
        records.remove(pos);
        write_records(&self.path, &records)?;
        Ok(true)
    }
}
