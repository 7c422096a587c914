//! Port contracts for actor lookup and allocation writes.
//!
//! Ports define infrastructure-agnostic interfaces used by identity and
//! allocation services.

pub mod directory;

pub use directory::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
