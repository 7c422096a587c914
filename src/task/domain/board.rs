//! Active and history views over a set of tasks.

use super::{Task, TaskStatus};

/// Tasks partitioned into work still open and approved history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    active: Vec<Task>,
    history: Vec<Task>,
}

impl TaskBoard {
    /// Partitions tasks given in creation order.
    ///
    /// Active tasks keep creation order. History is sorted by title in
    /// descending string order, so `Phase 10` sorts below `Phase 9`.
    #[must_use]
    pub fn partition(tasks: impl IntoIterator<Item = Task>) -> Self {
        let (mut history, active): (Vec<Task>, Vec<Task>) = tasks
            .into_iter()
            .partition(|task| task.status() == TaskStatus::Approved);
        sort_history(&mut history);
        Self { active, history }
    }

    /// Returns tasks that are not yet approved.
    #[must_use]
    pub fn active(&self) -> &[Task] {
        &self.active
    }

    /// Returns approved tasks, newest phase title first.
    #[must_use]
    pub fn history(&self) -> &[Task] {
        &self.history
    }

    /// Splits the board into `(active, history)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Task>, Vec<Task>) {
        (self.active, self.history)
    }
}

fn sort_history(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| right.title().cmp(left.title()));
}
