pub mod focus;
pub mod serialization;
pub mod task;
pub mod timestamp;

pub use focus::{CheckpointEntry, FocusChain, REINJECT_THRESHOLD};
pub use task::{TaskRecord, TaskStatus};
