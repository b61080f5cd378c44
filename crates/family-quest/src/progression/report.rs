//! Read models backing the dashboard: counters, leaderboard, activity feed and
//! per-family progress.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::completed_assignments;
use super::domain::{AssetTypeId, BadgeId, FamilyId, FamilyTaskId, Level};
use super::store::EntityStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub families: usize,
    pub tasks: usize,
    pub completed_assignments: usize,
    pub badges: usize,
    pub scores: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub family_id: FamilyId,
    pub name: String,
    pub sum_score: u32,
    pub completed_tasks: usize,
    pub badge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub family_task_id: FamilyTaskId,
    pub family_id: FamilyId,
    pub family_name: Option<String>,
    pub task_title: Option<String>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarnedBadge {
    pub badge_id: BadgeId,
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLevel {
    pub asset_type_id: AssetTypeId,
    pub asset_type_name: String,
    pub level: Option<Level>,
}

/// Everything the family progress panel shows, derived from assignment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyProgress {
    pub family_id: FamilyId,
    pub name: String,
    pub score: u32,
    pub completed_tasks: usize,
    pub earned_badges: Vec<EarnedBadge>,
    /// Highest level reached in each category.
    pub current_levels: Vec<CategoryLevel>,
    /// Every level, in any category, the family satisfies.
    pub available_levels: Vec<Level>,
}

pub fn dashboard_stats(store: &EntityStore) -> DashboardStats {
    DashboardStats {
        families: store.families().len(),
        tasks: store.tasks().len(),
        completed_assignments: store
            .family_tasks()
            .iter()
            .filter(|ft| ft.is_completed)
            .count(),
        badges: store.badges().len(),
        scores: store.scores().len(),
    }
}

/// Families ranked by cached `sum_score`, highest first; ties keep store order.
pub fn leaderboard(store: &EntityStore) -> Vec<LeaderboardEntry> {
    let mut families: Vec<_> = store.families().iter().collect();
    families.sort_by(|a, b| b.sum_score.cmp(&a.sum_score));

    families
        .into_iter()
        .enumerate()
        .map(|(index, family)| LeaderboardEntry {
            rank: index + 1,
            family_id: family.id,
            name: family.name.clone(),
            sum_score: family.sum_score,
            completed_tasks: completed_assignments(family.id, store.family_tasks()).count(),
            badge_count: family.earned_badges.len(),
        })
        .collect()
}

/// Newest completions first, limited to `limit` entries.
pub fn recent_activity(store: &EntityStore, limit: usize) -> Vec<RecentActivity> {
    let mut completions: Vec<_> = store
        .family_tasks()
        .iter()
        .filter(|ft| ft.is_completed)
        .filter_map(|ft| ft.completed_at.map(|at| (ft, at)))
        .collect();
    completions.sort_by(|(_, a), (_, b)| b.cmp(a));

    completions
        .into_iter()
        .take(limit)
        .map(|(ft, completed_at)| RecentActivity {
            family_task_id: ft.id,
            family_id: ft.family_id,
            family_name: store.family(ft.family_id).map(|family| family.name.clone()),
            task_title: store.task(ft.task_id).map(|task| task.title.clone()),
            completed_at,
        })
        .collect()
}
