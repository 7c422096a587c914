//! Domain model for project channels.

mod error;
mod gate;
mod message;

pub use error::ChatDomainError;
pub use gate::can_post;
pub use message::{ChannelMessage, MessageId};
