//! Score and badge aggregation over a family's completed assignments.
//!
//! Both aggregates are recomputed wholesale from the assignment records on
//! every call. A reference that no longer resolves contributes nothing.

use std::collections::BTreeSet;

use super::domain::{Badge, BadgeId, FamilyId, FamilyTask, Score, Task};

/// Completed assignment records belonging to the family.
pub fn completed_assignments(
    family_id: FamilyId,
    family_tasks: &[FamilyTask],
) -> impl Iterator<Item = &FamilyTask> {
    family_tasks
        .iter()
        .filter(move |ft| ft.family_id == family_id && ft.is_completed)
}

fn completed_tasks<'a>(
    family_id: FamilyId,
    family_tasks: &'a [FamilyTask],
    tasks: &'a [Task],
) -> impl Iterator<Item = &'a Task> {
    completed_assignments(family_id, family_tasks)
        .filter_map(move |ft| tasks.iter().find(|task| task.id == ft.task_id))
}

/// Sum of `value_point` over the scores of every completed task.
pub fn compute_family_score(
    family_id: FamilyId,
    family_tasks: &[FamilyTask],
    tasks: &[Task],
    scores: &[Score],
) -> u32 {
    completed_tasks(family_id, family_tasks, tasks)
        .filter_map(|task| task.score_id)
        .filter_map(|score_id| scores.iter().find(|score| score.id == score_id))
        .fold(0u32, |total, score| total.saturating_add(score.value_point))
}

/// Badges referenced by the family's completed tasks.
///
/// Ids with no matching badge record are skipped: a deleted badge is never earned.
pub fn compute_family_badges(
    family_id: FamilyId,
    family_tasks: &[FamilyTask],
    tasks: &[Task],
    badges: &[Badge],
) -> BTreeSet<BadgeId> {
    completed_tasks(family_id, family_tasks, tasks)
        .filter_map(|task| task.badge_id)
        .filter(|badge_id| badges.iter().any(|badge| badge.id == *badge_id))
        .collect()
}
