//! Application services for the project lifecycle and group formation.

mod group;
mod lifecycle;

pub use group::GroupFormationService;
pub use lifecycle::{CreateProjectRequest, ProjectLifecycleService};
