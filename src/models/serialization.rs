//! Record and checkpoint codecs
//!
//! Pure translation between the domain types and the persisted JSON
//! layouts. No I/O happens here. Decoding validates every field and
//! reports a [`StoreError::Schema`] naming the offending field and the
//! expectation; encoding cannot fail for a value that already satisfies
//! the domain invariants.
//!
//! Persisted layouts (fixed for interoperability with existing data):
//! - task record: `{status, owner, details, started_at, updated_at}`
//! - focus chain: `{taskId, objective, taskCount, tasks: [{id,
//!   description, status, timestamp}], lastReinject?}`

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::models::focus::{CheckpointEntry, FocusChain};
use crate::models::task::{TaskRecord, TaskStatus};
use crate::models::timestamp;

#[derive(Serialize)]
struct TaskRecordFile<'a> {
    status: &'a TaskStatus,
    owner: &'a str,
    details: &'a str,
    started_at: String,
    updated_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FocusChainFile<'a> {
    task_id: &'a str,
    objective: &'a str,
    task_count: u64,
    tasks: Vec<CheckpointEntryFile<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_reinject: Option<String>,
}

#[derive(Serialize)]
struct CheckpointEntryFile<'a> {
    id: &'a str,
    description: &'a str,
    status: &'a str,
    timestamp: String,
}

/// Encode a task record into its file representation.
///
/// The record's `id` keys the file and is not part of the payload.
pub fn encode_record(record: &TaskRecord) -> Result<String, StoreError> {
    let file = TaskRecordFile {
        status: &record.status,
        owner: &record.owner,
        details: &record.details,
        started_at: timestamp::encode(&record.started_at),
        updated_at: timestamp::encode(&record.updated_at),
    };
    to_pretty_json(&file)
}

/// Decode and validate a task record file.
pub fn decode_record(id: &str, raw: &str) -> Result<TaskRecord, StoreError> {
    let object = parse_object(raw, "task record")?;

    let status_raw = string_field(&object, "status")?;
    let status: TaskStatus = status_raw.parse().map_err(|_| {
        StoreError::schema("status", "one of: running, completed, failed, blocked")
    })?;
    let owner = string_field(&object, "owner")?;
    let details = string_field(&object, "details")?;
    let started_at = timestamp::decode("started_at", &string_field(&object, "started_at")?)?;
    let updated_at = timestamp::decode("updated_at", &string_field(&object, "updated_at")?)?;

    Ok(TaskRecord {
        id: id.to_string(),
        status,
        owner,
        details,
        started_at,
        updated_at,
    })
}

/// Encode a focus chain into its file representation.
pub fn encode_chain(chain: &FocusChain) -> Result<String, StoreError> {
    let file = FocusChainFile {
        task_id: &chain.task_id,
        objective: &chain.objective,
        task_count: chain.task_count,
        tasks: chain
            .entries
            .iter()
            .map(|entry| CheckpointEntryFile {
                id: &entry.id,
                description: &entry.description,
                status: &entry.status,
                timestamp: timestamp::encode(&entry.timestamp),
            })
            .collect(),
        last_reinject: chain.last_reinject.as_ref().map(timestamp::encode),
    };
    to_pretty_json(&file)
}

/// Decode and validate a focus chain file.
pub fn decode_chain(raw: &str) -> Result<FocusChain, StoreError> {
    let object = parse_object(raw, "focus chain")?;

    let task_id = string_field(&object, "taskId")?;
    let objective = string_field(&object, "objective")?;
    let task_count = match object.get("taskCount") {
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| StoreError::schema("taskCount", "a non-negative integer"))?,
        _ => return Err(StoreError::schema("taskCount", "a non-negative integer")),
    };

    let raw_entries = match object.get("tasks") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(StoreError::schema("tasks", "an array of checkpoint entries")),
    };
    let mut entries = Vec::with_capacity(raw_entries.len());
    for (index, raw_entry) in raw_entries.iter().enumerate() {
        entries.push(decode_entry(index, raw_entry)?);
    }

    if task_count != entries.len() as u64 {
        return Err(StoreError::schema(
            "taskCount",
            "a count matching the number of entries in tasks",
        ));
    }

    let last_reinject = match object.get("lastReinject") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(timestamp::decode("lastReinject", raw)?),
        Some(_) => return Err(StoreError::schema("lastReinject", "an ISO-8601 timestamp")),
    };

    Ok(FocusChain {
        task_id,
        objective,
        task_count,
        entries,
        last_reinject,
    })
}

fn decode_entry(index: usize, raw: &Value) -> Result<CheckpointEntry, StoreError> {
    let object = match raw {
        Value::Object(object) => object,
        _ => {
            return Err(StoreError::schema(
                format!("tasks[{index}]"),
                "a checkpoint entry object",
            ))
        }
    };
    let field = |name: &str| {
        string_field(object, name)
            .map_err(|_| StoreError::schema(format!("tasks[{index}].{name}"), "a string"))
    };

    Ok(CheckpointEntry {
        id: field("id")?,
        description: field("description")?,
        status: field("status")?,
        timestamp: timestamp::decode(&format!("tasks[{index}].timestamp"), &field("timestamp")?)?,
    })
}

fn parse_object(raw: &str, what: &str) -> Result<Map<String, Value>, StoreError> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(StoreError::schema(what, "a well-formed JSON object")),
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, StoreError> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(StoreError::schema(field, "a string")),
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    // These payloads are strings and numbers only, so serialization cannot
    // fail in practice; mapped so no unwrap reaches the library surface.
    serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::persistence("serialize", std::io::Error::other(e)))
}
