//! Milestone tree rules: reparenting validation and completion
//! timestamp transitions.
//!
//! Milestones of one project form a forest over a flat, persisted store
//! (`parent_id` self-reference). Validation therefore works on an arena
//! snapshot of the project's milestones and walks the parent chain
//! explicitly rather than building a linked structure.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Minimal milestone view needed for tree validation: the arena is the
/// full set of milestones belonging to one project.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
}

/// Validate moving `milestone_id` under `new_parent_id`.
///
/// Rejects a parent outside the project's arena, a self-parent, and any
/// move that would make the milestone an ancestor of itself. The cycle
/// check walks up from the candidate parent until it reaches a root or
/// revisits a node.
pub fn validate_reparent(
    arena: &[MilestoneNode],
    milestone_id: DbId,
    new_parent_id: DbId,
) -> Result<(), CoreError> {
    if new_parent_id == milestone_id {
        return Err(CoreError::Invariant(
            "a milestone cannot be its own parent".into(),
        ));
    }

    let parents: HashMap<DbId, Option<DbId>> =
        arena.iter().map(|n| (n.id, n.parent_id)).collect();

    if !parents.contains_key(&new_parent_id) {
        return Err(CoreError::NotFound {
            entity: "Milestone",
            id: new_parent_id,
        });
    }

    // Walk up from the candidate parent. Hitting the milestone being
    // moved means the candidate is one of its descendants.
    let mut seen = std::collections::HashSet::new();
    let mut cursor = Some(new_parent_id);
    while let Some(id) = cursor {
        if id == milestone_id {
            return Err(CoreError::Invariant(
                "new parent is a descendant of this milestone".into(),
            ));
        }
        if !seen.insert(id) {
            break;
        }
        cursor = parents.get(&id).copied().flatten();
    }

    Ok(())
}

/// Resolve the `completed_at` timestamp for a completion-state change.
///
/// Entering the completed state stamps `now`; leaving it clears the
/// timestamp; staying on the same side of the boundary keeps the current
/// value. Callers apply the returned value in the same write as the
/// state change so flag and timestamp never diverge.
pub fn completion_timestamp(
    was_completed: bool,
    now_completed: bool,
    current: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match (was_completed, now_completed) {
        (false, true) => Some(now),
        (true, false) => None,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn node(id: DbId, parent_id: Option<DbId>) -> MilestoneNode {
        MilestoneNode { id, parent_id }
    }

    #[test]
    fn self_parent_rejected() {
        let arena = [node(1, None)];
        assert_matches!(
            validate_reparent(&arena, 1, 1),
            Err(CoreError::Invariant(_))
        );
    }

    #[test]
    fn unknown_parent_rejected() {
        let arena = [node(1, None)];
        assert_matches!(
            validate_reparent(&arena, 1, 99),
            Err(CoreError::NotFound { id: 99, .. })
        );
    }

    #[test]
    fn descendant_parent_rejected() {
        // A -> B -> C; moving A under C would close a cycle.
        let arena = [node(1, None), node(2, Some(1)), node(3, Some(2))];
        assert_matches!(
            validate_reparent(&arena, 1, 3),
            Err(CoreError::Invariant(_))
        );
    }

    #[test]
    fn sibling_parent_allowed() {
        let arena = [node(1, None), node(2, Some(1)), node(3, Some(1))];
        assert!(validate_reparent(&arena, 3, 2).is_ok());
    }

    #[test]
    fn reparent_to_root_sibling_allowed() {
        let arena = [node(1, None), node(2, None)];
        assert!(validate_reparent(&arena, 1, 2).is_ok());
    }

    #[test]
    fn completion_timestamp_transitions() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::minutes(5);

        // Entering completed stamps now.
        assert_eq!(completion_timestamp(false, true, None, now), Some(now));
        // Leaving completed clears.
        assert_eq!(completion_timestamp(true, false, Some(earlier), now), None);
        // Unchanged on either side keeps the current value.
        assert_eq!(
            completion_timestamp(true, true, Some(earlier), now),
            Some(earlier)
        );
        assert_eq!(completion_timestamp(false, false, None, now), None);
    }
}
