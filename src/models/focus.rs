//! Focus chain types
//!
//! A focus chain is the append-only checkpoint history for one task,
//! together with the objective captured when the chain was initialized.
//! Every [`REINJECT_THRESHOLD`]th checkpoint produces a reinjection
//! message restating that objective, so long agent loops get pulled back
//! to their original goal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Number of checkpoints between successive reinjections.
pub const REINJECT_THRESHOLD: u64 = 5;

/// Checkpoint statuses counted as done when building a reinjection
/// message. Checkpoint status is free text, not the task status enum.
const COMPLETED_STATUS: &str = "completed";

/// One recorded progress report against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointEntry {
    /// Unique entry identifier
    pub id: String,
    /// What the agent reports having done
    pub description: String,
    /// Free-text status (commonly "running" or "completed")
    pub status: String,
    /// When the checkpoint was recorded
    pub timestamp: DateTime<Utc>,
}

impl CheckpointEntry {
    pub fn new(description: String, status: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description,
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered checkpoint history for one task.
///
/// Invariant: `task_count == entries.len()`; entries are never reordered
/// or removed, and their timestamps are non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChain {
    /// Task this chain tracks. Soft reference: the matching task record
    /// is not required to exist.
    pub task_id: String,
    /// Goal captured at initialization, immutable thereafter
    pub objective: String,
    /// Count of checkpoints appended so far
    pub task_count: u64,
    /// Append-only checkpoint entries, oldest first
    pub entries: Vec<CheckpointEntry>,
    /// When the most recent reinjection happened, if any
    pub last_reinject: Option<DateTime<Utc>>,
}

impl FocusChain {
    /// Build a fresh, empty chain for a task.
    pub fn new(task_id: String, objective: String) -> Self {
        Self {
            task_id,
            objective,
            task_count: 0,
            entries: Vec::new(),
            last_reinject: None,
        }
    }

    /// Append a checkpoint entry and bump the count.
    pub fn append(&mut self, entry: CheckpointEntry) {
        self.entries.push(entry);
        self.task_count += 1;
    }

    /// Whether the chain just crossed a reinjection boundary.
    pub fn at_reinject_boundary(&self) -> bool {
        self.task_count > 0 && self.task_count % REINJECT_THRESHOLD == 0
    }

    /// Build the reinjection message for the current state of the chain.
    ///
    /// Entries are partitioned into completed and remaining by the literal
    /// checkpoint status `"completed"`, preserving relative order. The
    /// message restates the objective verbatim, lists both partitions with
    /// their counts, and closes with a caution against scope drift.
    pub fn reinjection_message(&self) -> String {
        let (completed, remaining): (Vec<&CheckpointEntry>, Vec<&CheckpointEntry>) = self
            .entries
            .iter()
            .partition(|e| e.status == COMPLETED_STATUS);

        let mut message = String::new();
        message.push_str("FOCUS CHECK — original objective:\n");
        message.push_str(&self.objective);
        message.push_str("\n\n");

        message.push_str(&format!("Completed checkpoints ({}):\n", completed.len()));
        for entry in &completed {
            message.push_str(&format!("- {}\n", entry.description));
        }

        message.push_str(&format!("\nRemaining checkpoints ({}):\n", remaining.len()));
        for entry in &remaining {
            message.push_str(&format!("- {}\n", entry.description));
        }

        message.push_str(
            "\nStay on the objective stated above. Do not expand scope beyond it.",
        );
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_with(entries: &[(&str, &str)]) -> FocusChain {
        let mut chain = FocusChain::new("task-1".to_string(), "Ship v1".to_string());
        for (description, status) in entries {
            chain.append(CheckpointEntry::new(
                description.to_string(),
                status.to_string(),
            ));
        }
        chain
    }

    #[test]
    fn test_append_keeps_count_in_sync() {
        let chain = chain_with(&[("step1", "running"), ("step2", "completed")]);
        assert_eq!(chain.task_count, chain.entries.len() as u64);
    }

    #[test]
    fn test_reinject_boundary_at_multiples_of_threshold() {
        let mut chain = FocusChain::new("task-1".to_string(), "goal".to_string());
        assert!(!chain.at_reinject_boundary());

        for i in 1..=12u64 {
            chain.append(CheckpointEntry::new(format!("step{i}"), "running".into()));
            assert_eq!(chain.at_reinject_boundary(), i % REINJECT_THRESHOLD == 0);
        }
    }

    #[test]
    fn test_reinjection_message_partitions_by_completed_literal() {
        let chain = chain_with(&[
            ("step1", "running"),
            ("step2", "running"),
            ("step3", "running"),
            ("step4", "running"),
            ("step5", "completed"),
        ]);
        let message = chain.reinjection_message();

        assert!(message.contains("Ship v1"));
        assert!(message.contains("Completed checkpoints (1):"));
        assert!(message.contains("Remaining checkpoints (4):"));

        // step5 is listed under completed, steps 1-4 under remaining
        let completed_section = message.split("Remaining checkpoints").next().unwrap();
        assert!(completed_section.contains("- step5"));
        for step in ["step1", "step2", "step3", "step4"] {
            assert!(!completed_section.contains(&format!("- {step}")));
            assert!(message.contains(&format!("- {step}")));
        }
    }

    #[test]
    fn test_reinjection_message_preserves_relative_order() {
        let chain = chain_with(&[
            ("b-first", "completed"),
            ("a-second", "completed"),
            ("z-open", "running"),
        ]);
        let message = chain.reinjection_message();
        let first = message.find("b-first").unwrap();
        let second = message.find("a-second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let chain = chain_with(&[("step1", "running"), ("step2", "running")]);
        assert_ne!(chain.entries[0].id, chain.entries[1].id);
    }
}
