//! Storage root layout and ensure-exists handling
//!
//! All persisted state lives under one root directory:
//! `tasks/{id}.json` for task records and `focus/{taskId}.json` for focus
//! chains. `ensure()` is invoked before every write and is idempotent, so
//! concurrent callers racing to create the layout cannot fail each other.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

const TASKS_DIR: &str = "tasks";
const FOCUS_DIR: &str = "focus";

/// Root directory holding all persisted task state.
#[derive(Debug, Clone)]
pub struct StoreRoot {
    root: PathBuf,
}

impl StoreRoot {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Default location under the platform data directory
    /// (e.g. `~/.local/share/tether` on Linux).
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            StoreError::persistence(
                "resolve data directory",
                std::io::Error::other("no platform data directory available"),
            )
        })?;
        Ok(Self::new(base.join("tether")))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join(TASKS_DIR)
    }

    pub fn focus_dir(&self) -> PathBuf {
        self.root.join(FOCUS_DIR)
    }

    pub fn task_path(&self, id: &str) -> PathBuf {
        self.tasks_dir().join(format!("{id}.json"))
    }

    pub fn focus_path(&self, task_id: &str) -> PathBuf {
        self.focus_dir().join(format!("{task_id}.json"))
    }

    /// Create the directory layout if it is missing.
    ///
    /// `create_dir_all` succeeds when the directories already exist, so
    /// concurrent calls never fail each other.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.tasks_dir(), self.focus_dir()] {
            fs::create_dir_all(&dir)
                .map_err(|e| StoreError::persistence(format!("create {}", dir.display()), e))?;
        }
        Ok(())
    }
}
