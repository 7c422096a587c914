//! Workflow event notifications.
//!
//! Services describe every committed transition as a [`domain::WorkflowEvent`]
//! and hand it to a [`services::NotificationPublisher`], which fans it out
//! into one [`domain::Notification`] per recipient. Delivery is best effort:
//! a failing dispatcher is logged and never undoes the transition. The
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
