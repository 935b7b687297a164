//! File locking utilities for safe concurrent access
//!
//! Provides locked read/write operations using `fs2` advisory locks so
//! concurrent callers mutating the same record cannot corrupt it or lose
//! each other's writes. Mutations of one entity go through
//! [`locked_modify`], which holds the exclusive lock across the whole
//! read-modify-write cycle; entities live in separate files, so distinct
//! identifiers never contend.
//!
//! Locks are taken on a `.lock` sibling of the data file, never on the
//! data file itself: the data file is replaced by renaming a staged
//! `.tmp` sibling over it, and a lock on a renamed-away inode would no
//! longer serialize anything. The lock file persists beside the data
//! file. The rename is the commit point - until it happens the previous
//! content is untouched, so a failed or interrupted write leaves the
//! prior record intact.
//!
//! Advisory locks are cooperative - all participants must use these
//! functions for the locking to be effective.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Read file contents with a shared (read) lock.
///
/// Allows multiple concurrent readers but blocks while an exclusive
/// (write) lock is held.
pub fn locked_read(path: &Path) -> Result<String> {
    let _lock = acquire(path, LockMode::Shared)?;
    fs::read_to_string(path)
        .map_err(|e| StoreError::persistence(format!("read {}", path.display()), e))
}

/// Write file contents with an exclusive (write) lock.
///
/// The payload is staged to a sibling file and renamed into place while
/// the lock is held; the previous content survives any failure before
/// the rename commits.
pub fn locked_write(path: &Path, content: &str) -> Result<()> {
    let _lock = acquire(path, LockMode::Exclusive)?;
    replace_contents(path, content)
}

/// Read, transform, and rewrite a file under one exclusive lock.
///
/// The lock is held for the entire cycle, so two concurrent modifications
/// of the same file serialize instead of racing read-modify-write: each
/// caller observes the previous caller's committed content. If `modify`
/// or the staged write fails, the file is left exactly as it was.
pub fn locked_modify(path: &Path, modify: impl FnOnce(&str) -> Result<String>) -> Result<()> {
    let _lock = acquire(path, LockMode::Exclusive)?;
    let current = fs::read_to_string(path)
        .map_err(|e| StoreError::persistence(format!("read {}", path.display()), e))?;
    let next = modify(&current)?;
    replace_contents(path, &next)
}

enum LockMode {
    Shared,
    Exclusive,
}

/// Path of the lock sibling for a data file (`{file}.lock`).
fn lock_path(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

/// Path the replacement payload is staged at (`{file}.tmp`).
fn staging_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn acquire(path: &Path, mode: LockMode) -> Result<File> {
    let lock_path = lock_path(path);
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)
        .map_err(|e| StoreError::persistence(format!("open {}", lock_path.display()), e))?;
    match mode {
        LockMode::Shared => file.lock_shared(),
        LockMode::Exclusive => file.lock_exclusive(),
    }
    .map_err(|e| StoreError::persistence(format!("lock {}", lock_path.display()), e))?;
    Ok(file)
}

/// Replace the data file's contents via stage-and-rename.
///
/// The previous content is never touched in place; any failure before
/// the rename leaves it intact, and the staged file is cleaned up.
fn replace_contents(path: &Path, content: &str) -> Result<()> {
    let staged = staging_path(path);
    let result = write_staged(&staged, content).and_then(|()| {
        fs::rename(&staged, path)
            .map_err(|e| StoreError::persistence(format!("replace {}", path.display()), e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    result
}

fn write_staged(staged: &Path, content: &str) -> Result<()> {
    let mut file = File::create(staged)
        .map_err(|e| StoreError::persistence(format!("stage {}", staged.display()), e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| StoreError::persistence(format!("write {}", staged.display()), e))?;
    // The payload must be on disk before the rename commits it
    file.sync_all()
        .map_err(|e| StoreError::persistence(format!("sync {}", staged.display()), e))
}
