//! Focus chain checkpoint engine
//!
//! Owns the mapping from task id to its checkpoint log. Agents report
//! progress through `add_checkpoint`; every [`REINJECT_THRESHOLD`]th
//! checkpoint yields a reinjection message the caller is expected to feed
//! back into its own context. Independent of the task store: a chain may
//! exist for an id with no task record.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::fs::focus_chains;
use crate::fs::store_root::StoreRoot;
use crate::models::focus::{CheckpointEntry, FocusChain};
use crate::models::serialization;

pub use crate::models::focus::REINJECT_THRESHOLD;

/// Engine for focus chains, one JSON file per tracked task.
#[derive(Debug, Clone)]
pub struct FocusChainEngine {
    root: StoreRoot,
}

impl FocusChainEngine {
    pub fn new(root: StoreRoot) -> Self {
        Self { root }
    }

    /// Create (or overwrite) the chain for `task_id` with the given
    /// objective, zero checkpoints, and no reinjection history.
    pub fn initialize(&self, task_id: &str, objective: &str) -> Result<()> {
        let chain = FocusChain::new(task_id.to_string(), objective.to_string());
        let payload = serialization::encode_chain(&chain)?;
        focus_chains::write_chain(&self.root, task_id, &payload)?;
        debug!(task_id, "focus chain initialized");
        Ok(())
    }

    /// Record a progress checkpoint against `task_id`.
    ///
    /// Returns `Some(message)` when this checkpoint lands on a multiple of
    /// [`REINJECT_THRESHOLD`], `None` otherwise.
    ///
    /// If no chain exists yet, one is created with `description` as its
    /// objective and `Ok(None)` is returned: first-ever contact for an id
    /// only initializes, it never appends an entry or yields a message.
    /// Prefer calling [`initialize`](Self::initialize) explicitly with a
    /// real objective.
    pub fn add_checkpoint(
        &self,
        task_id: &str,
        description: &str,
        status: &str,
    ) -> Result<Option<String>> {
        if !focus_chains::chain_exists(&self.root, task_id) {
            warn!(
                task_id,
                "no focus chain; initializing with the checkpoint description as objective"
            );
            self.initialize(task_id, description)?;
            return Ok(None);
        }

        let mut message = None;
        focus_chains::modify_chain(&self.root, task_id, |current| {
            let mut chain = serialization::decode_chain(current)?;
            chain.append(CheckpointEntry::new(
                description.to_string(),
                status.to_string(),
            ));
            if chain.at_reinject_boundary() {
                message = Some(chain.reinjection_message());
                chain.last_reinject = Some(Utc::now());
            }
            serialization::encode_chain(&chain)
        })?;

        debug!(task_id, reinjected = message.is_some(), "checkpoint added");
        Ok(message)
    }

    /// The current chain for `task_id`, or `None` if none exists.
    /// A missing chain is not an error.
    pub fn status(&self, task_id: &str) -> Result<Option<FocusChain>> {
        if !focus_chains::chain_exists(&self.root, task_id) {
            return Ok(None);
        }
        let raw = focus_chains::read_chain(&self.root, task_id)?;
        serialization::decode_chain(&raw).map(Some)
    }
}
