//! tether — agent task lifecycle store with focus-chain reinjection
//!
//! Tracks asynchronous units of work created by automated agents, one
//! JSON record per task, and layers a focus chain on top: an append-only
//! checkpoint log per task that re-surfaces the task's original objective
//! after every fifth recorded checkpoint, countering goal drift in long
//! automated loops.
//!
//! The public surface consumed by a transport adapter is
//! [`store::TaskStore`] (`create` / `get` / `update`) and
//! [`store::FocusChainEngine`] (`initialize` / `add_checkpoint` /
//! `status`), both rooted at a [`fs::StoreRoot`]. All failures use the
//! closed [`error::StoreError`] taxonomy.

pub mod error;
pub mod fs;
pub mod models;
pub mod store;

pub use error::{Result, StoreError};
pub use fs::StoreRoot;
pub use models::{CheckpointEntry, FocusChain, TaskRecord, TaskStatus, REINJECT_THRESHOLD};
pub use store::{FocusChainEngine, TaskStore};
