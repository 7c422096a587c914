//! Domain model for workflow notifications.

mod event;
mod ids;
mod notification;

pub use event::WorkflowEvent;
pub use ids::NotificationId;
pub use notification::Notification;
