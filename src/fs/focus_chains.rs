//! Focus chain file I/O
//!
//! Handles the raw files at `{root}/focus/{taskId}.json`. Mirrors
//! `fs::task_records`: explicit existence checks, advisory-locked reads
//! and writes, payload format owned by the codec.

use crate::error::{Result, StoreError};
use crate::fs::locking;
use crate::fs::store_root::StoreRoot;

/// Check whether a chain file exists for `task_id`.
pub fn chain_exists(root: &StoreRoot, task_id: &str) -> bool {
    root.focus_path(task_id).exists()
}

/// Read the raw chain payload, failing `NotFound` if no file exists.
pub fn read_chain(root: &StoreRoot, task_id: &str) -> Result<String> {
    let path = root.focus_path(task_id);
    if !path.exists() {
        return Err(StoreError::NotFound {
            id: task_id.to_string(),
        });
    }
    locking::locked_read(&path)
}

/// Write a chain payload, creating the directory layout if needed.
pub fn write_chain(root: &StoreRoot, task_id: &str, payload: &str) -> Result<()> {
    root.ensure()?;
    locking::locked_write(&root.focus_path(task_id), payload)
}

/// Rewrite a chain under one exclusive lock held across the whole
/// read-modify-write. Fails `NotFound` if no file exists.
pub fn modify_chain(
    root: &StoreRoot,
    task_id: &str,
    modify: impl FnOnce(&str) -> Result<String>,
) -> Result<()> {
    let path = root.focus_path(task_id);
    if !path.exists() {
        return Err(StoreError::NotFound {
            id: task_id.to_string(),
        });
    }
    locking::locked_modify(&path, modify)
}
