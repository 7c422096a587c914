//! Actor identity, roles, and capability resolution.
//!
//! Every workflow call carries an explicit [`domain::Session`]. The
//! [`services::IdentityResolver`] turns that session into a
//! [`domain::ResolvedActor`] by consulting the actor directory; an actor
//! whose role cannot be resolved ends up with an empty capability set and
//! every gated operation rejects it. The module follows hexagonal
//! architecture:
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
