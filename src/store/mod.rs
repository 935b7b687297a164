pub mod focus;
pub mod tasks;

pub use focus::FocusChainEngine;
pub use tasks::TaskStore;
