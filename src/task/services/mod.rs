//! Application services for the phase workflow.

mod workflow;

pub use workflow::{CreateTaskRequest, TaskWorkflowService};
