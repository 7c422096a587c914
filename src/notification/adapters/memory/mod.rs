//! In-memory notification adapters.

mod inbox;

pub use inbox::InMemoryNotificationInbox;
