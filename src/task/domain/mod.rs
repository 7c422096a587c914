//! Domain model for phase tasks.
//!
//! Tasks move strictly forward through `Pending`, `Submitted` and
//! `Approved`. Approved tasks are immutable and make up the history view.

mod board;
mod error;
mod ids;
mod status;
mod task;

pub use board::TaskBoard;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{PhaseNumber, TaskId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
