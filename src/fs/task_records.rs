//! Task record file I/O
//!
//! Handles the raw files at `{root}/tasks/{id}.json`. Whether a record
//! exists is decided by an explicit path check, never by inspecting I/O
//! error codes; the codec in `models::serialization` owns the payload
//! format.

use crate::error::{Result, StoreError};
use crate::fs::locking;
use crate::fs::store_root::StoreRoot;

/// Check whether a record file exists for `id`.
pub fn record_exists(root: &StoreRoot, id: &str) -> bool {
    root.task_path(id).exists()
}

/// Read the raw record payload, failing `NotFound` if no file exists.
pub fn read_record(root: &StoreRoot, id: &str) -> Result<String> {
    let path = root.task_path(id);
    if !path.exists() {
        return Err(StoreError::NotFound { id: id.to_string() });
    }
    locking::locked_read(&path)
}

/// Write a record payload, creating the directory layout if needed.
pub fn write_record(root: &StoreRoot, id: &str, payload: &str) -> Result<()> {
    root.ensure()?;
    locking::locked_write(&root.task_path(id), payload)
}

/// Rewrite a record under one exclusive lock held across the whole
/// read-modify-write. Fails `NotFound` if no file exists.
pub fn modify_record(
    root: &StoreRoot,
    id: &str,
    modify: impl FnOnce(&str) -> Result<String>,
) -> Result<()> {
    let path = root.task_path(id);
    if !path.exists() {
        return Err(StoreError::NotFound { id: id.to_string() });
    }
    locking::locked_modify(&path, modify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let root = StoreRoot::new(temp.path());

        write_record(&root, "id-1", "{}").unwrap();
        assert!(record_exists(&root, "id-1"));
        assert_eq!(read_record(&root, "id-1").unwrap(), "{}");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let root = StoreRoot::new(temp.path());

        let err = read_record(&root, "ghost").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref id } if id == "ghost"));
    }

    #[test]
    fn test_modify_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let root = StoreRoot::new(temp.path());

        let err = modify_record(&root, "ghost", |c| Ok(c.to_string())).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
