//! Seed document used when no snapshot is supplied.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use super::domain::{
    AssetType, AssetTypeId, Badge, BadgeId, Family, FamilyId, FamilyTask, FamilyTaskId, Level,
    LevelId, RequirementPolicy, Reward, RewardId, Score, ScoreId, Task, TaskId,
};
use super::snapshot::Snapshot;

/// Builds the demo household: three categories, four badges, six scores, six
/// levels, five tasks, three families and five assignments.
///
/// Completed assignments are stamped a few minutes apart ending at `now`.
/// Family aggregates are left at zero; recompute before reading them.
pub fn sample_snapshot(now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        asset_types: vec![
            asset_type(1, "Household", "Home and family related tasks"),
            asset_type(2, "Education", "Learning and educational activities"),
            asset_type(3, "Health", "Health and fitness activities"),
        ],
        badges: vec![
            badge(1, 1, "Clean Master", "Completed 10 cleaning tasks", 1, "fas fa-broom"),
            badge(2, 1, "Kitchen Helper", "Helped with cooking 5 times", 2, "fas fa-utensils"),
            badge(
                3,
                2,
                "Study Champion",
                "Completed homework for 7 days straight",
                3,
                "fas fa-graduation-cap",
            ),
            badge(
                4,
                3,
                "Fitness Star",
                "Exercised for 30 minutes daily for a week",
                4,
                "fas fa-dumbbell",
            ),
        ],
        scores: vec![
            score(1, 1, 10, Some(1)),
            score(2, 1, 15, Some(2)),
            score(3, 2, 20, Some(3)),
            score(4, 3, 25, Some(4)),
            score(5, 1, 5, None),
            score(6, 2, 30, None),
        ],
        levels: vec![
            level(1, 1, 1, "Beginner Helper", 100, &[1]),
            level(2, 1, 2, "Active Helper", 300, &[1, 2]),
            level(3, 1, 3, "Super Helper", 600, &[1, 2]),
            level(4, 2, 1, "Student", 150, &[3]),
            level(5, 2, 2, "Scholar", 400, &[3]),
            level(6, 3, 1, "Health Conscious", 200, &[4]),
        ],
        tasks: vec![
            task(
                1,
                "Clean Your Room",
                "Make bed, organize clothes, and clean surfaces",
                Some(1),
                Some(1),
            ),
            task(
                2,
                "Help with Dinner",
                "Assist with meal preparation and table setting",
                Some(2),
                Some(2),
            ),
            task(
                3,
                "Complete Homework",
                "Finish all assigned homework and review lessons",
                Some(3),
                Some(3),
            ),
            task(4, "Exercise Time", "30 minutes of physical activity", Some(4), Some(4)),
            task(
                5,
                "Take Out Trash",
                "Empty all wastebaskets and take to curb",
                None,
                Some(5),
            ),
        ],
        families: vec![
            family(1, "The Johnson Family"),
            family(2, "The Smith Family"),
            family(3, "The Brown Family"),
        ],
        family_tasks: vec![
            completed(1, 1, 1, now - Duration::minutes(40)),
            completed(2, 1, 2, now - Duration::minutes(30)),
            completed(3, 2, 1, now - Duration::minutes(20)),
            FamilyTask {
                id: FamilyTaskId(4),
                family_id: FamilyId(2),
                task_id: TaskId(3),
                is_completed: false,
                completed_at: None,
                assets_earned: 0,
            },
            completed(5, 3, 4, now),
        ],
        rewards: vec![
            reward(1, 1, "Movie Night Choice", Some(1), Some(1), Some(1), RequirementPolicy::All),
            reward(2, 1, "Extra Allowance", Some(2), None, None, RequirementPolicy::LevelOnly),
            reward(3, 2, "Educational Game", None, Some(3), Some(3), RequirementPolicy::Any),
        ],
    }
}

fn asset_type(id: u32, name: &str, description: &str) -> AssetType {
    AssetType {
        id: AssetTypeId(id),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn badge(id: u32, asset_type: u32, title: &str, description: &str, score: u32, icon: &str) -> Badge {
    Badge {
        id: BadgeId(id),
        asset_type_id: AssetTypeId(asset_type),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        score_id: Some(ScoreId(score)),
    }
}

fn score(id: u32, asset_type: u32, value_point: u32, badge: Option<u32>) -> Score {
    Score {
        id: ScoreId(id),
        asset_type_id: AssetTypeId(asset_type),
        value_point,
        badge_id: badge.map(BadgeId),
    }
}

fn level(
    id: u32,
    asset_type: u32,
    level_number: u32,
    name: &str,
    required_points: u32,
    badges: &[u32],
) -> Level {
    Level {
        id: LevelId(id),
        asset_type_id: AssetTypeId(asset_type),
        level_number,
        name: name.to_string(),
        required_points,
        required_badges: badges.iter().copied().map(BadgeId).collect::<BTreeSet<_>>(),
    }
}

fn task(id: u32, title: &str, description: &str, badge: Option<u32>, score: Option<u32>) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        description: description.to_string(),
        badge_id: badge.map(BadgeId),
        score_id: score.map(ScoreId),
    }
}

fn family(id: u32, name: &str) -> Family {
    Family {
        id: FamilyId(id),
        name: name.to_string(),
        sum_score: 0,
        earned_badges: BTreeSet::new(),
    }
}

// Every seeded task that is completed carries both a badge and a score.
fn completed(id: u32, family: u32, task: u32, at: DateTime<Utc>) -> FamilyTask {
    FamilyTask {
        id: FamilyTaskId(id),
        family_id: FamilyId(family),
        task_id: TaskId(task),
        is_completed: true,
        completed_at: Some(at),
        assets_earned: 2,
    }
}

fn reward(
    id: u32,
    asset_type: u32,
    title: &str,
    level: Option<u32>,
    score: Option<u32>,
    badge: Option<u32>,
    requirement_type: RequirementPolicy,
) -> Reward {
    Reward {
        id: RewardId(id),
        asset_type_id: AssetTypeId(asset_type),
        title: title.to_string(),
        level_id: level.map(LevelId),
        score_id: score.map(ScoreId),
        badge_id: badge.map(BadgeId),
        requirement_type,
    }
}
