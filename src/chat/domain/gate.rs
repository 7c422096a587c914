//! Posting rule for project channels.

use crate::identity::domain::{Capability, ResolvedActor};
use crate::project::domain::{Project, ProjectKind};

/// Returns whether the actor may post to the project's channel.
///
/// The project's authority may always post. Otherwise only the assigned
/// student of an individual project or the head of a group may; ordinary
/// group members read only.
#[must_use]
pub fn can_post(actor: &ResolvedActor, project: &Project) -> bool {
    if !actor.has(Capability::PostToChannel) {
        return false;
    }
    if project.is_authority(actor) {
        return true;
    }
    match project.kind() {
        ProjectKind::Individual { assigned_student } => *assigned_student == Some(actor.id()),
        ProjectKind::Group { head, .. } => *head == Some(actor.id()),
    }
}
