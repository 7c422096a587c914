//! In-memory chat adapters.

mod channel;

pub use channel::InMemoryChatChannel;
