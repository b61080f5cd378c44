use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::progression::domain::{
    AssetTypeId, BadgeId, FamilyId, FamilyTaskId, Level, LevelId, RequirementPolicy, Reward,
    ScoreId, TaskId,
};
use crate::progression::rewards::FamilyState;
use crate::progression::store::{EntityStore, NewBadge, NewLevel, NewReward, NewScore, NewTask};
use crate::progression::{EngineConfig, ProgressionEngine};

pub(super) const HOUSEHOLD: AssetTypeId = AssetTypeId(1);
pub(super) const CLEAN_MASTER: BadgeId = BadgeId(1);
pub(super) const KITCHEN_HELPER: BadgeId = BadgeId(2);
pub(super) const TEN_POINTS: ScoreId = ScoreId(1);
pub(super) const FIFTEEN_POINTS: ScoreId = ScoreId(2);
pub(super) const FIVE_POINTS: ScoreId = ScoreId(3);
/// Grants Clean Master and 10 points.
pub(super) const CLEAN_ROOM: TaskId = TaskId(1);
/// Grants 15 points, no badge.
pub(super) const HELP_WITH_DINNER: TaskId = TaskId(2);
/// Grants Kitchen Helper only.
pub(super) const BAKE_BREAD: TaskId = TaskId(3);
pub(super) const JOHNSON: FamilyId = FamilyId(1);
pub(super) const SMITH: FamilyId = FamilyId(2);

pub(super) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 2, 9, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn household_store() -> EntityStore {
    let mut store = EntityStore::new(&EngineConfig::default());
    let household = store
        .add_asset_type("Household", "Home and family related tasks")
        .expect("asset type added");
    assert_eq!(household.id, HOUSEHOLD);

    store
        .add_badge(badge("Clean Master", "fas fa-broom"), &[])
        .expect("badge added");
    store
        .add_badge(badge("Kitchen Helper", "fas fa-utensils"), &[])
        .expect("badge added");

    store
        .add_score(score(10, Some(CLEAN_MASTER)))
        .expect("score added");
    store.add_score(score(15, None)).expect("score added");
    store.add_score(score(5, None)).expect("score added");

    store
        .add_task(task("Clean Your Room", Some(CLEAN_MASTER), Some(TEN_POINTS)))
        .expect("task added");
    store
        .add_task(task("Help with Dinner", None, Some(FIFTEEN_POINTS)))
        .expect("task added");
    store
        .add_task(task("Bake Bread", Some(KITCHEN_HELPER), None))
        .expect("task added");

    store.add_family("The Johnson Family").expect("family added");
    store.add_family("The Smith Family").expect("family added");
    store
}

pub(super) fn household_engine() -> ProgressionEngine {
    ProgressionEngine::new(household_store(), EngineConfig::default())
}

pub(super) fn badge(title: &str, icon: &str) -> NewBadge {
    NewBadge {
        asset_type_id: HOUSEHOLD,
        title: title.to_string(),
        description: String::new(),
        icon: icon.to_string(),
    }
}

pub(super) fn score(value_point: u32, badge_id: Option<BadgeId>) -> NewScore {
    NewScore {
        asset_type_id: HOUSEHOLD,
        value_point,
        badge_id,
    }
}

pub(super) fn task(title: &str, badge_id: Option<BadgeId>, score_id: Option<ScoreId>) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        badge_id,
        score_id,
    }
}

pub(super) fn add_level(
    store: &mut EntityStore,
    name: &str,
    required_points: u32,
    required_badges: &[BadgeId],
) -> Level {
    let level_number = store.levels_for(HOUSEHOLD).len() as u32 + 1;
    store
        .add_level(NewLevel {
            asset_type_id: HOUSEHOLD,
            level_number,
            name: name.to_string(),
            required_points,
            required_badges: required_badges.iter().copied().collect(),
        })
        .expect("level added")
}

pub(super) fn add_reward(
    store: &mut EntityStore,
    policy: RequirementPolicy,
    level_id: Option<LevelId>,
    score_id: Option<ScoreId>,
    badge_id: Option<BadgeId>,
) -> Reward {
    store
        .add_reward(NewReward {
            asset_type_id: HOUSEHOLD,
            title: format!("{policy} reward"),
            level_id,
            score_id,
            badge_id,
            requirement_type: policy,
        })
        .expect("reward added")
}

/// Assigns and completes a task, returning the assignment id.
pub(super) fn complete(
    store: &mut EntityStore,
    family_id: FamilyId,
    task_id: TaskId,
    minute: u32,
) -> FamilyTaskId {
    let assignment = store
        .assign_task(family_id, task_id)
        .expect("task assigned");
    store
        .set_completion(assignment.id, true, at(minute))
        .expect("completion recorded");
    assignment.id
}

pub(super) fn state(score: u32, badges: &[BadgeId], current_level: Option<Level>) -> FamilyState {
    FamilyState {
        family_id: JOHNSON,
        asset_type_id: HOUSEHOLD,
        score,
        earned_badges: badges.iter().copied().collect::<BTreeSet<_>>(),
        current_level,
    }
}

pub(super) fn bare_level(id: u32, required_points: u32, required_badges: &[BadgeId]) -> Level {
    Level {
        id: LevelId(id),
        asset_type_id: HOUSEHOLD,
        level_number: id,
        name: format!("Level {id}"),
        required_points,
        required_badges: required_badges.iter().copied().collect(),
    }
}
