//! End-to-end flow across both engines: create a task, initialize its
//! focus chain, report progress, and receive periodic reinjections.

use tempfile::TempDir;
use tether::{FocusChainEngine, StoreRoot, TaskStatus, TaskStore};

#[test]
fn full_task_lifecycle_with_focus_reinjection() {
    let temp = TempDir::new().unwrap();
    let root = StoreRoot::new(temp.path());
    let store = TaskStore::new(root.clone());
    let focus = FocusChainEngine::new(root);

    // Create the task and capture its objective in a focus chain.
    let id = store.create("agent-1", "start").unwrap();
    focus.initialize(&id, "Ship v1").unwrap();

    let record = store.get(&id).unwrap();
    assert_eq!(record.status, TaskStatus::Running);
    assert_eq!(record.started_at, record.updated_at);

    // Four progress reports stay quiet.
    for i in 1..=4 {
        let message = focus
            .add_checkpoint(&id, &format!("step{i}"), "running")
            .unwrap();
        assert!(message.is_none(), "checkpoint {i} should not reinject");
    }

    // The fifth report reinjects the objective with both partitions.
    let message = focus
        .add_checkpoint(&id, "step5", "completed")
        .unwrap()
        .expect("fifth checkpoint should reinject");
    assert!(message.contains("Ship v1"));
    assert!(message.contains("step5"));
    assert!(message.contains("step1"));

    // Reinjection recurs at every multiple of five, not just the first.
    for i in 6..=9 {
        let message = focus
            .add_checkpoint(&id, &format!("step{i}"), "running")
            .unwrap();
        assert!(message.is_none(), "checkpoint {i} should not reinject");
    }
    let message = focus.add_checkpoint(&id, "step10", "running").unwrap();
    assert!(message.is_some(), "tenth checkpoint should reinject");

    // Wrap up the task; empty details are legal on update.
    store.update(&id, "completed", "").unwrap();
    let record = store.get(&id).unwrap();
    assert_eq!(record.status, TaskStatus::Completed);
    assert_eq!(record.details, "");
    assert_eq!(record.owner, "agent-1");
    assert!(record.updated_at >= record.started_at);

    // The chain kept the whole history.
    let chain = focus.status(&id).unwrap().unwrap();
    assert_eq!(chain.task_count, 10);
    assert_eq!(chain.objective, "Ship v1");
    assert!(chain.last_reinject.is_some());
}

#[test]
fn engines_are_independent() {
    let temp = TempDir::new().unwrap();
    let root = StoreRoot::new(temp.path());
    let store = TaskStore::new(root.clone());
    let focus = FocusChainEngine::new(root);

    // A focus chain may track an id with no task record behind it.
    focus.initialize("untracked-id", "standalone goal").unwrap();
    assert!(focus.status("untracked-id").unwrap().is_some());
    assert!(store.get("untracked-id").is_err());

    // And a task record needs no chain.
    let id = store.create("agent-2", "no chain here").unwrap();
    assert!(focus.status(&id).unwrap().is_none());
}

#[test]
fn stored_files_survive_reopening_the_store() {
    let temp = TempDir::new().unwrap();

    let id = {
        let store = TaskStore::new(StoreRoot::new(temp.path()));
        store.create("agent-1", "persist me").unwrap()
    };

    // A fresh handle over the same root sees the same record.
    let store = TaskStore::new(StoreRoot::new(temp.path()));
    let record = store.get(&id).unwrap();
    assert_eq!(record.details, "persist me");
}
