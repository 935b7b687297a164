pub mod focus_chains;
pub mod locking;
pub mod store_root;
pub mod task_records;

pub use store_root::StoreRoot;
