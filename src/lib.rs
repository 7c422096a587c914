//! Capstone: project and phase lifecycle engine for supervised student
//! projects.
//!
//! This crate decides which workflow operations are legal, for whom, and
//! what state results. Students propose projects and submit phase work,
//! supervisors create and approve phases, and a super-administrator pairs
//! students with supervisors within a capacity ceiling.
//!
//! # Architecture
//!
//! Capstone follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   notification inbox, chat channel)
//!
//! # Modules
//!
//! - [`identity`]: Actors, roles, capabilities, and session resolution
//! - [`project`]: Project aggregate, status pipeline, and group formation
//! - [`task`]: Phase creation and the submit/approve protocol
//! - [`allocation`]: Pairing unassigned students with supervisors
//! - [`chat`]: Project channel posting gate
//! - [`notification`]: Event descriptors emitted after committed transitions
//! - [`config`]: Engine policy configuration
//! - [`error`]: Workflow error taxonomy

pub mod allocation;
pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod notification;
pub mod project;
pub mod revision;
pub mod task;

#[cfg(test)]
mod test_support;

pub use config::WorkflowConfig;
pub use error::{ErrorKind, WorkflowError, WorkflowResult};
pub use revision::Revision;
