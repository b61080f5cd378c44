use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::config::EngineConfig;
use super::domain::{
    AssetType, AssetTypeId, Badge, BadgeId, Family, FamilyId, FamilyTask, FamilyTaskId, Level,
    LevelId, RequirementPolicy, Reward, RewardId, Score, ScoreId, Task, TaskId,
};
use super::snapshot::Snapshot;

/// Collections a foreign key can point into, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    AssetType,
    Badge,
    Score,
    Task,
    Level,
    Reward,
    Family,
    FamilyTask,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AssetType => "asset type",
            Self::Badge => "badge",
            Self::Score => "score",
            Self::Task => "task",
            Self::Level => "level",
            Self::Reward => "reward",
            Self::Family => "family",
            Self::FamilyTask => "family task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejections raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u32 },
    #[error("at least one of badge or score must be selected")]
    TaskWithoutAssets,
    #[error("point value {value} outside allowed range 1..={max}")]
    InvalidPointValue { value: u32, max: u32 },
    #[error("score {score_id} is used by {} task(s)", .tasks.len())]
    ScoreInUse { score_id: ScoreId, tasks: Vec<TaskId> },
    #[error("task {task_id} is already assigned to family {family_id}")]
    DuplicateAssignment { family_id: FamilyId, task_id: TaskId },
    #[error("{entity} ids are exhausted")]
    IdSpaceExhausted { entity: EntityKind },
}

/// True iff the task grants a badge, a score, or both.
pub fn is_task_valid(task: &Task) -> bool {
    task.is_valid()
}

/// False iff any task still references the score.
pub fn can_delete_score(score_id: ScoreId, tasks: &[Task]) -> bool {
    !tasks.iter().any(|task| task.score_id == Some(score_id))
}

fn next_id<T>(
    entity: EntityKind,
    items: &[T],
    id: impl Fn(&T) -> u32,
) -> Result<u32, StoreError> {
    match items.iter().map(id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted { entity }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub asset_type_id: AssetTypeId,
    pub value_point: u32,
    pub badge_id: Option<BadgeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBadge {
    pub asset_type_id: AssetTypeId,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub badge_id: Option<BadgeId>,
    pub score_id: Option<ScoreId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLevel {
    pub asset_type_id: AssetTypeId,
    pub level_number: u32,
    pub name: String,
    pub required_points: u32,
    pub required_badges: BTreeSet<BadgeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReward {
    pub asset_type_id: AssetTypeId,
    pub title: String,
    pub level_id: Option<LevelId>,
    pub score_id: Option<ScoreId>,
    pub badge_id: Option<BadgeId>,
    pub requirement_type: RequirementPolicy,
}

/// Records removed or rewritten by an asset type deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub levels_removed: Vec<LevelId>,
    pub badges_removed: Vec<BadgeId>,
    pub scores_removed: Vec<ScoreId>,
    pub rewards_removed: Vec<RewardId>,
    /// Tasks that lost a badge or score reference but still grant something.
    pub tasks_detached: Vec<TaskId>,
    /// Tasks left granting nothing, removed with their assignments.
    pub tasks_removed: Vec<TaskId>,
    pub family_tasks_removed: usize,
}

/// In-memory owner of every record collection.
///
/// Foreign keys are plain ids; the store keeps them consistent on deletion by
/// nulling or cascading, never by holding references between records.
#[derive(Debug, Clone)]
pub struct EntityStore {
    data: Snapshot,
    max_point_value: u32,
}

impl EntityStore {
    pub fn new(config: &EngineConfig) -> Self {
        Self::from_snapshot(Snapshot::default(), config)
    }

    pub fn from_snapshot(data: Snapshot, config: &EngineConfig) -> Self {
        Self {
            data,
            max_point_value: config.max_point_value,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.data
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.data
    }

    pub fn asset_types(&self) -> &[AssetType] {
        &self.data.asset_types
    }

    pub fn badges(&self) -> &[Badge] {
        &self.data.badges
    }

    pub fn scores(&self) -> &[Score] {
        &self.data.scores
    }

    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn levels(&self) -> &[Level] {
        &self.data.levels
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.data.rewards
    }

    pub fn families(&self) -> &[Family] {
        &self.data.families
    }

    pub fn family_tasks(&self) -> &[FamilyTask] {
        &self.data.family_tasks
    }

    pub fn asset_type(&self, id: AssetTypeId) -> Option<&AssetType> {
        self.data.asset_types.iter().find(|item| item.id == id)
    }

    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.data.badges.iter().find(|item| item.id == id)
    }

    pub fn score(&self, id: ScoreId) -> Option<&Score> {
        self.data.scores.iter().find(|item| item.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.data.tasks.iter().find(|item| item.id == id)
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.data.levels.iter().find(|item| item.id == id)
    }

    pub fn reward(&self, id: RewardId) -> Option<&Reward> {
        self.data.rewards.iter().find(|item| item.id == id)
    }

    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.data.families.iter().find(|item| item.id == id)
    }

    pub fn family_task(&self, id: FamilyTaskId) -> Option<&FamilyTask> {
        self.data.family_tasks.iter().find(|item| item.id == id)
    }

    pub(crate) fn family_mut(&mut self, id: FamilyId) -> Option<&mut Family> {
        self.data.families.iter_mut().find(|item| item.id == id)
    }

    /// Scores whose `badge_id` points at the badge.
    pub fn associated_scores(&self, badge_id: BadgeId) -> Vec<&Score> {
        self.data
            .scores
            .iter()
            .filter(|score| score.badge_id == Some(badge_id))
            .collect()
    }

    /// The badge a score is tagged with, if it still exists.
    pub fn badge_for_score(&self, score_id: ScoreId) -> Option<&Badge> {
        self.score(score_id)
            .and_then(|score| score.badge_id)
            .and_then(|badge_id| self.badge(badge_id))
    }

    pub fn levels_for(&self, asset_type_id: AssetTypeId) -> Vec<&Level> {
        self.data
            .levels
            .iter()
            .filter(|level| level.asset_type_id == asset_type_id)
            .collect()
    }

    pub fn rewards_for(&self, asset_type_id: AssetTypeId) -> Vec<&Reward> {
        self.data
            .rewards
            .iter()
            .filter(|reward| reward.asset_type_id == asset_type_id)
            .collect()
    }

    /// Tasks the family has no assignment record for yet.
    pub fn unassigned_tasks(&self, family_id: FamilyId) -> Vec<&Task> {
        self.data
            .tasks
            .iter()
            .filter(|task| {
                !self
                    .data
                    .family_tasks
                    .iter()
                    .any(|ft| ft.family_id == family_id && ft.task_id == task.id)
            })
            .collect()
    }

    pub fn add_asset_type(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<AssetType, StoreError> {
        let record = AssetType {
            id: AssetTypeId(next_id(
                EntityKind::AssetType,
                &self.data.asset_types,
                |item| item.id.get(),
            )?),
            name: name.into(),
            description: description.into(),
        };
        self.data.asset_types.push(record.clone());
        Ok(record)
    }

    pub fn add_score(&mut self, new: NewScore) -> Result<Score, StoreError> {
        self.check_point_value(new.value_point)?;
        self.require_asset_type(new.asset_type_id)?;
        if let Some(badge_id) = new.badge_id {
            self.require_badge(badge_id)?;
        }

        let record = Score {
            id: ScoreId(next_id(
                EntityKind::Score,
                &self.data.scores,
                |item| item.id.get(),
            )?),
            asset_type_id: new.asset_type_id,
            value_point: new.value_point,
            badge_id: new.badge_id,
        };
        self.data.scores.push(record.clone());
        Ok(record)
    }

    pub fn update_score(&mut self, id: ScoreId, new: NewScore) -> Result<Score, StoreError> {
        self.check_point_value(new.value_point)?;
        self.require_asset_type(new.asset_type_id)?;
        if let Some(badge_id) = new.badge_id {
            self.require_badge(badge_id)?;
        }

        let score = self
            .data
            .scores
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Score,
                id: id.get(),
            })?;
        score.asset_type_id = new.asset_type_id;
        score.value_point = new.value_point;
        score.badge_id = new.badge_id;
        Ok(score.clone())
    }

    /// Creates a badge and tags each listed score with it.
    pub fn add_badge(
        &mut self,
        new: NewBadge,
        associated_scores: &[ScoreId],
    ) -> Result<Badge, StoreError> {
        self.require_asset_type(new.asset_type_id)?;
        for score_id in associated_scores {
            self.require_score(*score_id)?;
        }

        let record = Badge {
            id: BadgeId(next_id(
                EntityKind::Badge,
                &self.data.badges,
                |item| item.id.get(),
            )?),
            asset_type_id: new.asset_type_id,
            title: new.title,
            description: new.description,
            icon: new.icon,
            score_id: None,
        };
        self.data.badges.push(record.clone());
        self.retag_scores(record.id, associated_scores);
        Ok(record)
    }

    /// Replaces the set of scores associated with a badge.
    pub fn set_badge_scores(
        &mut self,
        badge_id: BadgeId,
        score_ids: &[ScoreId],
    ) -> Result<(), StoreError> {
        self.require_badge(badge_id)?;
        for score_id in score_ids {
            self.require_score(*score_id)?;
        }
        self.retag_scores(badge_id, score_ids);
        Ok(())
    }

    fn retag_scores(&mut self, badge_id: BadgeId, score_ids: &[ScoreId]) {
        for score in &mut self.data.scores {
            if score_ids.contains(&score.id) {
                score.badge_id = Some(badge_id);
            } else if score.badge_id == Some(badge_id) {
                score.badge_id = None;
            }
        }
    }

    pub fn add_task(&mut self, new: NewTask) -> Result<Task, StoreError> {
        let record = Task {
            id: TaskId(next_id(
                EntityKind::Task,
                &self.data.tasks,
                |item| item.id.get(),
            )?),
            title: new.title,
            description: new.description,
            badge_id: new.badge_id,
            score_id: new.score_id,
        };
        self.validate_task(&record)?;
        self.data.tasks.push(record.clone());
        Ok(record)
    }

    pub fn update_task(&mut self, id: TaskId, new: NewTask) -> Result<Task, StoreError> {
        let candidate = Task {
            id,
            title: new.title,
            description: new.description,
            badge_id: new.badge_id,
            score_id: new.score_id,
        };
        self.validate_task(&candidate)?;

        let task = self
            .data
            .tasks
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Task,
                id: id.get(),
            })?;
        *task = candidate;
        Ok(task.clone())
    }

    fn validate_task(&self, task: &Task) -> Result<(), StoreError> {
        if !is_task_valid(task) {
            return Err(StoreError::TaskWithoutAssets);
        }
        if let Some(badge_id) = task.badge_id {
            self.require_badge(badge_id)?;
        }
        if let Some(score_id) = task.score_id {
            self.require_score(score_id)?;
        }
        Ok(())
    }

    pub fn add_level(&mut self, new: NewLevel) -> Result<Level, StoreError> {
        self.require_asset_type(new.asset_type_id)?;
        for badge_id in &new.required_badges {
            self.require_badge(*badge_id)?;
        }

        let record = Level {
            id: LevelId(next_id(
                EntityKind::Level,
                &self.data.levels,
                |item| item.id.get(),
            )?),
            asset_type_id: new.asset_type_id,
            level_number: new.level_number,
            name: new.name,
            required_points: new.required_points,
            required_badges: new.required_badges,
        };
        self.data.levels.push(record.clone());
        Ok(record)
    }

    pub fn add_reward(&mut self, new: NewReward) -> Result<Reward, StoreError> {
        self.require_asset_type(new.asset_type_id)?;
        if let Some(level_id) = new.level_id {
            self.require_level(level_id)?;
        }
        if let Some(score_id) = new.score_id {
            self.require_score(score_id)?;
        }
        if let Some(badge_id) = new.badge_id {
            self.require_badge(badge_id)?;
        }

        let record = Reward {
            id: RewardId(next_id(
                EntityKind::Reward,
                &self.data.rewards,
                |item| item.id.get(),
            )?),
            asset_type_id: new.asset_type_id,
            title: new.title,
            level_id: new.level_id,
            score_id: new.score_id,
            badge_id: new.badge_id,
            requirement_type: new.requirement_type,
        };
        self.data.rewards.push(record.clone());
        Ok(record)
    }

    pub fn add_family(&mut self, name: impl Into<String>) -> Result<Family, StoreError> {
        let record = Family {
            id: FamilyId(next_id(
                EntityKind::Family,
                &self.data.families,
                |item| item.id.get(),
            )?),
            name: name.into(),
            sum_score: 0,
            earned_badges: BTreeSet::new(),
        };
        self.data.families.push(record.clone());
        Ok(record)
    }

    /// Creates an open assignment; each (family, task) pair may exist once.
    pub fn assign_task(
        &mut self,
        family_id: FamilyId,
        task_id: TaskId,
    ) -> Result<FamilyTask, StoreError> {
        self.require_family(family_id)?;
        self.require_task(task_id)?;
        if self
            .data
            .family_tasks
            .iter()
            .any(|ft| ft.family_id == family_id && ft.task_id == task_id)
        {
            return Err(StoreError::DuplicateAssignment { family_id, task_id });
        }

        let record = FamilyTask {
            id: FamilyTaskId(next_id(
                EntityKind::FamilyTask,
                &self.data.family_tasks,
                |item| item.id.get(),
            )?),
            family_id,
            task_id,
            is_completed: false,
            completed_at: None,
            assets_earned: 0,
        };
        self.data.family_tasks.push(record.clone());
        Ok(record)
    }

    /// Marks an assignment complete (stamped with `at`) or reopens it.
    ///
    /// Family aggregates are left untouched; the caller recomputes afterward.
    pub fn set_completion(
        &mut self,
        id: FamilyTaskId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<FamilyTask, StoreError> {
        let task_id = self
            .family_task(id)
            .map(|ft| ft.task_id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::FamilyTask,
                id: id.get(),
            })?;
        let assets = self.task(task_id).map_or(0, Task::asset_count);

        let record = self
            .data
            .family_tasks
            .iter_mut()
            .find(|ft| ft.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::FamilyTask,
                id: id.get(),
            })?;
        record.is_completed = completed;
        if completed {
            record.completed_at = Some(at);
            record.assets_earned = assets;
        } else {
            record.completed_at = None;
            record.assets_earned = 0;
        }
        Ok(record.clone())
    }

    pub fn delete_family(&mut self, id: FamilyId) -> Result<Family, StoreError> {
        let index = find_index(&self.data.families, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Family,
                id: id.get(),
            })?;
        let removed = self.data.families.remove(index);
        let before = self.data.family_tasks.len();
        self.data.family_tasks.retain(|ft| ft.family_id != id);
        info!(
            family_id = %id,
            assignments_removed = before - self.data.family_tasks.len(),
            "family deleted"
        );
        Ok(removed)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let index = find_index(&self.data.tasks, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Task,
                id: id.get(),
            })?;
        let removed = self.data.tasks.remove(index);
        let before = self.data.family_tasks.len();
        self.data.family_tasks.retain(|ft| ft.task_id != id);
        info!(
            task_id = %id,
            assignments_removed = before - self.data.family_tasks.len(),
            "task deleted"
        );
        Ok(removed)
    }

    pub fn delete_level(&mut self, id: LevelId) -> Result<Level, StoreError> {
        let index = find_index(&self.data.levels, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Level,
                id: id.get(),
            })?;
        let removed = self.data.levels.remove(index);
        self.detach_level(id);
        info!(level_id = %id, "level deleted");
        Ok(removed)
    }

    pub fn delete_reward(&mut self, id: RewardId) -> Result<Reward, StoreError> {
        let index = find_index(&self.data.rewards, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Reward,
                id: id.get(),
            })?;
        Ok(self.data.rewards.remove(index))
    }

    /// Removes a badge, nulling score and task references to it.
    pub fn delete_badge(&mut self, id: BadgeId) -> Result<Badge, StoreError> {
        let index = find_index(&self.data.badges, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Badge,
                id: id.get(),
            })?;
        let removed = self.data.badges.remove(index);
        self.detach_badge(id);
        info!(badge_id = %id, "badge deleted");
        Ok(removed)
    }

    /// Removes a score unless a task still references it.
    pub fn delete_score(&mut self, id: ScoreId) -> Result<Score, StoreError> {
        let index = find_index(&self.data.scores, |item| item.id == id)
            .ok_or(StoreError::NotFound {
                entity: EntityKind::Score,
                id: id.get(),
            })?;
        if !can_delete_score(id, &self.data.tasks) {
            let tasks = self
                .data
                .tasks
                .iter()
                .filter(|task| task.score_id == Some(id))
                .map(|task| task.id)
                .collect();
            return Err(StoreError::ScoreInUse { score_id: id, tasks });
        }

        let removed = self.data.scores.remove(index);
        self.detach_score(id);
        info!(score_id = %id, "score deleted");
        Ok(removed)
    }

    /// Removes an asset type with everything it owns.
    ///
    /// Task references into the removed badges and scores are nulled; a task
    /// this leaves granting nothing is removed along with its assignments.
    pub fn delete_asset_type(&mut self, id: AssetTypeId) -> Result<CascadeSummary, StoreError> {
        let index = find_index(&self.data.asset_types, |item| item.id == id).ok_or(
            StoreError::NotFound {
                entity: EntityKind::AssetType,
                id: id.get(),
            },
        )?;
        self.data.asset_types.remove(index);

        let mut summary = CascadeSummary {
            levels_removed: drain_ids(&mut self.data.levels, |l| l.asset_type_id == id, |l| l.id),
            badges_removed: drain_ids(&mut self.data.badges, |b| b.asset_type_id == id, |b| b.id),
            scores_removed: drain_ids(&mut self.data.scores, |s| s.asset_type_id == id, |s| s.id),
            rewards_removed: drain_ids(
                &mut self.data.rewards,
                |r| r.asset_type_id == id,
                |r| r.id,
            ),
            ..CascadeSummary::default()
        };

        let mut touched = Vec::new();
        for task in &mut self.data.tasks {
            let lost_score = task
                .score_id
                .is_some_and(|score_id| summary.scores_removed.contains(&score_id));
            let lost_badge = task
                .badge_id
                .is_some_and(|badge_id| summary.badges_removed.contains(&badge_id));
            if lost_score {
                task.score_id = None;
            }
            if lost_badge {
                task.badge_id = None;
            }
            if lost_score || lost_badge {
                touched.push(task.id);
            }
        }

        for level_id in summary.levels_removed.clone() {
            self.detach_level(level_id);
        }
        for badge_id in summary.badges_removed.clone() {
            self.detach_badge(badge_id);
        }
        for score_id in summary.scores_removed.clone() {
            self.detach_score(score_id);
        }

        // Only tasks emptied by this cascade are removed.
        summary.tasks_removed = drain_ids(
            &mut self.data.tasks,
            |task| touched.contains(&task.id) && !task.is_valid(),
            |task| task.id,
        );
        summary.tasks_detached = touched
            .into_iter()
            .filter(|task_id| !summary.tasks_removed.contains(task_id))
            .collect();

        let before = self.data.family_tasks.len();
        self.data
            .family_tasks
            .retain(|ft| !summary.tasks_removed.contains(&ft.task_id));
        summary.family_tasks_removed = before - self.data.family_tasks.len();

        info!(
            asset_type_id = %id,
            levels = summary.levels_removed.len(),
            badges = summary.badges_removed.len(),
            scores = summary.scores_removed.len(),
            rewards = summary.rewards_removed.len(),
            tasks_removed = summary.tasks_removed.len(),
            "asset type deleted"
        );
        Ok(summary)
    }

    fn detach_level(&mut self, id: LevelId) {
        for reward in &mut self.data.rewards {
            if reward.level_id == Some(id) {
                reward.level_id = None;
            }
        }
    }

    fn detach_badge(&mut self, id: BadgeId) {
        for score in &mut self.data.scores {
            if score.badge_id == Some(id) {
                score.badge_id = None;
            }
        }
        for task in &mut self.data.tasks {
            if task.badge_id == Some(id) {
                task.badge_id = None;
            }
        }
    }

    fn detach_score(&mut self, id: ScoreId) {
        for badge in &mut self.data.badges {
            if badge.score_id == Some(id) {
                badge.score_id = None;
            }
        }
        for reward in &mut self.data.rewards {
            if reward.score_id == Some(id) {
                reward.score_id = None;
            }
        }
    }

    fn check_point_value(&self, value: u32) -> Result<(), StoreError> {
        if value == 0 || value > self.max_point_value {
            return Err(StoreError::InvalidPointValue {
                value,
                max: self.max_point_value,
            });
        }
        Ok(())
    }

    fn require_asset_type(&self, id: AssetTypeId) -> Result<(), StoreError> {
        self.asset_type(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::AssetType,
            id: id.get(),
        })
    }

    fn require_badge(&self, id: BadgeId) -> Result<(), StoreError> {
        self.badge(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::Badge,
            id: id.get(),
        })
    }

    fn require_score(&self, id: ScoreId) -> Result<(), StoreError> {
        self.score(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::Score,
            id: id.get(),
        })
    }

    fn require_task(&self, id: TaskId) -> Result<(), StoreError> {
        self.task(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::Task,
            id: id.get(),
        })
    }

    fn require_level(&self, id: LevelId) -> Result<(), StoreError> {
        self.level(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::Level,
            id: id.get(),
        })
    }

    fn require_family(&self, id: FamilyId) -> Result<(), StoreError> {
        self.family(id).map(|_| ()).ok_or(StoreError::NotFound {
            entity: EntityKind::Family,
            id: id.get(),
        })
    }
}

fn find_index<T>(items: &[T], matches: impl Fn(&T) -> bool) -> Option<usize> {
    items.iter().position(matches)
}

fn drain_ids<T, I>(
    items: &mut Vec<T>,
    remove: impl Fn(&T) -> bool,
    id: impl Fn(&T) -> I,
) -> Vec<I> {
    let mut removed = Vec::new();
    items.retain(|item| {
        if remove(item) {
            removed.push(id(item));
            false
        } else {
            true
        }
    });
    removed
}
