// todostore - Concurrent in-memory task store with ordered positioning and derived statistics

pub mod events;
pub mod models;
pub mod ops;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use events::TaskEvent;
pub use models::{DEFAULT_PRIORITY, NewTask, Task, TaskPatch};
pub use ops::{OpsError, TaskOps};
pub use stats::Statistics;
pub use store::TaskStore;
