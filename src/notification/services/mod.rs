//! Application services for notification fan-out.

mod publisher;

pub use publisher::NotificationPublisher;
