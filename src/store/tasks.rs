//! Task state store
//!
//! Owns the mapping from task id to persisted task record. Records are
//! created with `create`, read back with `get`, and mutated only through
//! `update`, which rewrites the whole record under an exclusive lock so
//! concurrent updates of the same id serialize instead of silently losing
//! one write.

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::fs::store_root::StoreRoot;
use crate::fs::task_records;
use crate::models::serialization;
use crate::models::task::{TaskRecord, TaskStatus};

/// Store for task records, one JSON file per task under the root.
#[derive(Debug, Clone)]
pub struct TaskStore {
    root: StoreRoot,
}

impl TaskStore {
    pub fn new(root: StoreRoot) -> Self {
        Self { root }
    }

    /// Create a new task and return its freshly assigned id.
    ///
    /// Both arguments are trimmed and must be non-empty. The record starts
    /// as `Running` with `started_at == updated_at`. If the write fails,
    /// no record exists for the returned-would-be id.
    pub fn create(&self, owner: &str, details: &str) -> Result<String> {
        let owner = owner.trim();
        let details = details.trim();
        if owner.is_empty() {
            return Err(StoreError::Validation {
                field: "owner",
                reason: "must be a non-empty string",
            });
        }
        if details.is_empty() {
            return Err(StoreError::Validation {
                field: "details",
                reason: "must be a non-empty string",
            });
        }

        let record = TaskRecord::new(
            Uuid::new_v4().to_string(),
            owner.to_string(),
            details.to_string(),
        );
        let payload = serialization::encode_record(&record)?;
        task_records::write_record(&self.root, &record.id, &payload)?;

        debug!(id = %record.id, owner, "task created");
        Ok(record.id)
    }

    /// Fetch the fully validated record for `id`.
    pub fn get(&self, id: &str) -> Result<TaskRecord> {
        let id = id.trim();
        let raw = task_records::read_record(&self.root, id)?;
        serialization::decode_record(id, &raw)
    }

    /// Update a task's status and details.
    ///
    /// `status` must be one of the four wire names; `details` is trimmed
    /// and, unlike at creation, may legally be empty. `owner` and
    /// `started_at` are carried over from the existing record and
    /// `updated_at` is restamped. The read-modify-write happens under one
    /// exclusive lock; on failure the previous record stays intact.
    pub fn update(&self, id: &str, status: &str, details: &str) -> Result<()> {
        let id = id.trim();
        let details = details.trim();
        let status: TaskStatus = status.parse()?;

        task_records::modify_record(&self.root, id, |current| {
            let record = serialization::decode_record(id, current)?;
            let updated = record.with_update(status, details.to_string());
            serialization::encode_record(&updated)
        })?;

        debug!(id, %status, "task updated");
        Ok(())
    }
}
