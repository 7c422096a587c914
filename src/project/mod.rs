//! Project aggregate, status pipeline, and group formation.
//!
//! A project is either individual (one assigned student) or a group (a
//! member list with a single project head). Its supervisor, or a
//! super-administrator, moves it along the five-stage status pipeline,
//! reviews the initial proposal, and manages group membership. The module
//! follows hexagonal architecture:
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
