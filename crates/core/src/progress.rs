//! Derived progress summary for a milestone.
//!
//! Counts only the milestone's directly attached tasks and direct child
//! milestones (one level, never grandchildren). The summary is cheap to
//! recompute and is never persisted or cached across writes.

use serde::Serialize;

/// A completed/total pair for one dimension of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressCounts {
    pub completed: u32,
    pub total: u32,
}

impl ProgressCounts {
    /// Completion percentage in whole percent. Zero totals report 0%,
    /// never a division error.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Progress of a milestone over its direct tasks and direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    pub tasks: ProgressCounts,
    pub children: ProgressCounts,
}

/// Compute progress from completion flags of the milestone's direct
/// tasks and direct child milestones (`true` = completed).
pub fn milestone_progress<T, C>(task_flags: T, child_flags: C) -> MilestoneProgress
where
    T: IntoIterator<Item = bool>,
    C: IntoIterator<Item = bool>,
{
    MilestoneProgress {
        tasks: count(task_flags),
        children: count(child_flags),
    }
}

fn count<I: IntoIterator<Item = bool>>(flags: I) -> ProgressCounts {
    let mut completed = 0;
    let mut total = 0;
    for done in flags {
        total += 1;
        if done {
            completed += 1;
        }
    }
    ProgressCounts { completed, total }
}
