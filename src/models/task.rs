//! Task record types
//!
//! A task record is the persisted state of one unit of work created by an
//! automated agent. Records live one-per-file, keyed by their id, and are
//! mutated only through [`crate::store::TaskStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is actively being worked on
    Running,
    /// Task finished successfully
    Completed,
    /// Task finished unsuccessfully
    Failed,
    /// Task is waiting on something external
    Blocked,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(TaskStatus::Running),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(StoreError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// The persisted state of one tracked unit of work.
///
/// `id` keys the record file and is never written into it; the remaining
/// fields mirror the file layout exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Opaque unique identifier, assigned at creation, immutable
    pub id: String,
    pub status: TaskStatus,
    /// Agent that created the task; non-empty, trimmed
    pub owner: String,
    /// Free-text description of current state
    pub details: String,
    /// Set once at creation, never modified
    pub started_at: DateTime<Utc>,
    /// Refreshed on every successful update; never earlier than `started_at`
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Build a fresh record for `create`: status Running, both timestamps
    /// stamped to the same instant.
    pub fn new(id: String, owner: String, details: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: TaskStatus::Running,
            owner,
            details,
            started_at: now,
            updated_at: now,
        }
    }

    /// Build the successor record for `update`: keeps `owner` and
    /// `started_at`, replaces status and details, restamps `updated_at`.
    pub fn with_update(&self, status: TaskStatus, details: String) -> Self {
        Self {
            id: self.id.clone(),
            status,
            owner: self.owner.clone(),
            details,
            started_at: self.started_at,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("running".parse::<TaskStatus>().unwrap(), TaskStatus::Running);
        assert_eq!(
            "completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert_eq!("failed".parse::<TaskStatus>().unwrap(), TaskStatus::Failed);
        assert_eq!("blocked".parse::<TaskStatus>().unwrap(), TaskStatus::Blocked);
        assert!("paused".parse::<TaskStatus>().is_err());
        // Wire names are exact: no case folding
        assert!("Running".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_wire_names() {
        for status in [
            TaskStatus::Running,
            TaskStatus::Completed,
            TaskStatus::Failed,
            TaskStatus::Blocked,
        ] {
            assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_new_record_stamps_both_timestamps_equal() {
        let record = TaskRecord::new(
            "id-1".to_string(),
            "agent-1".to_string(),
            "start".to_string(),
        );
        assert_eq!(record.status, TaskStatus::Running);
        assert_eq!(record.started_at, record.updated_at);
    }

    #[test]
    fn test_with_update_preserves_owner_and_started_at() {
        let record = TaskRecord::new(
            "id-1".to_string(),
            "agent-1".to_string(),
            "start".to_string(),
        );
        let updated = record.with_update(TaskStatus::Completed, String::new());

        assert_eq!(updated.owner, record.owner);
        assert_eq!(updated.started_at, record.started_at);
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.details, "");
        assert!(updated.updated_at >= record.started_at);
    }
}
