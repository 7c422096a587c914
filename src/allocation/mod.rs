//! Pairing of unassigned students with supervisors.
//!
//! The administrator works from the pool of students without a supervisor
//! and the list of supervisors with their remaining capacity. Pairing
//! itself is delegated to
//! [`ProjectLifecycleService::assign_supervisor`](crate::project::services::ProjectLifecycleService::assign_supervisor),
//! which also hands the student's unsupervised projects to the new
//! supervisor.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
