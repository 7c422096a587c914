//! Phase (task) workflow for capstone projects.
//!
//! A supervisor issues numbered phases against a project; the responsible
//! student submits each one and the supervisor approves it. Approved phases
//! form the project's history. Phase numbers come from a counter on the
//! owning project, so they increase strictly and are never reused. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
