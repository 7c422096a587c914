//! Application services for project channels.

mod chat;

pub use chat::ChatService;
