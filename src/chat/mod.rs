//! Project channel posting gate.
//!
//! Every project has one message channel. Its supervisor (or the
//! administrator) and its responsible student may post: the assigned student
//! of an individual project or the head of a group. Other group members read
//! only. The module follows hexagonal architecture:
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
