//! Logging for rejected authorization checks.

use crate::error::WorkflowError;
use crate::identity::domain::AuthorizationError;
use tracing::debug;

/// Logs a rejected authorization check and converts it for propagation.
pub(crate) fn denied(err: AuthorizationError) -> WorkflowError {
    debug!(
        actor_id = %err.actor_id(),
        capability = %err.capability(),
        reason = %err,
        "authorization rejected"
    );
    WorkflowError::from(err)
}
