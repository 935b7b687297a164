//! Error taxonomy for the task store and focus chain engine
//!
//! Every fallible operation in this crate surfaces one of these variants
//! synchronously to its caller. A failed write never leaves a partially
//! committed record behind; the previously persisted value stays intact.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Closed error taxonomy shared by both engines.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A caller-supplied argument failed a precondition. Nothing was
    /// persisted; correcting the input makes the call succeed.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// The supplied status is not one of the recognized task statuses.
    #[error("invalid status {value:?}: expected one of: running, completed, failed, blocked")]
    InvalidStatus { value: String },

    /// No record or focus chain exists for the given identifier.
    #[error("no record found for id {id:?}")]
    NotFound { id: String },

    /// A persisted payload failed decode validation. This indicates
    /// external corruption or an incompatible format; retrying the same
    /// read will not help.
    #[error("schema violation in {field:?}: expected {expected}")]
    Schema { field: String, expected: String },

    /// The underlying storage operation (read, write, or ensure-exists)
    /// failed.
    #[error("storage failure during {op}: {source}")]
    Persistence {
        op: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn schema(field: impl Into<String>, expected: impl Into<String>) -> Self {
        StoreError::Schema {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn persistence(op: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Persistence {
            op: op.into(),
            source,
        }
    }
}
