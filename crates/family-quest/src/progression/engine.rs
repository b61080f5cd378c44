use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::aggregate::{compute_family_badges, compute_family_score, completed_assignments};
use super::config::EngineConfig;
use super::domain::{AssetTypeId, BadgeId, FamilyId, FamilyTask, FamilyTaskId, Level, RewardId};
use super::levels::{qualifying_levels, resolve_current_level};
use super::report::{
    self, CategoryLevel, DashboardStats, EarnedBadge, FamilyProgress, LeaderboardEntry,
    RecentActivity,
};
use super::rewards::{FamilyState, RewardEvaluation, RewardEvaluator};
use super::snapshot::Snapshot;
use super::store::{EntityStore, StoreError};

/// Which family aggregates a recompute should refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeScope {
    Family(FamilyId),
    All,
}

/// Errors raised when the host asks about records the store does not hold.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("family {0} not found")]
    FamilyNotFound(FamilyId),
    #[error("reward {0} not found")]
    RewardNotFound(RewardId),
    #[error("asset type {0} not found")]
    AssetTypeNotFound(AssetTypeId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Engine instance owning one entity store snapshot.
///
/// Level and reward answers are always derived on demand from the assignment
/// records; the cached `sum_score`/`earned_badges` on each family are only
/// refreshed by [`ProgressionEngine::request_recompute`].
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    store: EntityStore,
    config: EngineConfig,
}

impl ProgressionEngine {
    pub fn new(store: EntityStore, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn from_snapshot(snapshot: Snapshot, config: EngineConfig) -> Self {
        let store = EntityStore::from_snapshot(snapshot, &config);
        Self::new(store, config)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn into_store(self) -> EntityStore {
        self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn family_score(&self, family_id: FamilyId) -> Result<u32, EngineError> {
        self.require_family(family_id)?;
        Ok(compute_family_score(
            family_id,
            self.store.family_tasks(),
            self.store.tasks(),
            self.store.scores(),
        ))
    }

    pub fn family_badges(&self, family_id: FamilyId) -> Result<BTreeSet<BadgeId>, EngineError> {
        self.require_family(family_id)?;
        Ok(compute_family_badges(
            family_id,
            self.store.family_tasks(),
            self.store.tasks(),
            self.store.badges(),
        ))
    }

    /// Recomputes and writes back family aggregates, returning the refreshed ids.
    pub fn request_recompute(
        &mut self,
        scope: RecomputeScope,
    ) -> Result<Vec<FamilyId>, EngineError> {
        let targets: Vec<FamilyId> = match scope {
            RecomputeScope::Family(family_id) => {
                self.require_family(family_id)?;
                vec![family_id]
            }
            RecomputeScope::All => self.store.families().iter().map(|f| f.id).collect(),
        };

        for family_id in &targets {
            let family_id = *family_id;
            let sum_score = self.family_score(family_id)?;
            let earned_badges = self.family_badges(family_id)?;

            let dangling = self.dangling_references(family_id);
            if dangling > 0 {
                warn!(%family_id, dangling, "completed assignments reference missing records");
            }
            debug!(
                %family_id,
                sum_score,
                badges = earned_badges.len(),
                "family aggregates recomputed"
            );

            if let Some(family) = self.store.family_mut(family_id) {
                family.sum_score = sum_score;
                family.earned_badges = earned_badges;
            }
        }

        Ok(targets)
    }

    fn dangling_references(&self, family_id: FamilyId) -> usize {
        completed_assignments(family_id, self.store.family_tasks())
            .filter(|ft| match self.store.task(ft.task_id) {
                None => true,
                Some(task) => {
                    task.score_id
                        .is_some_and(|score_id| self.store.score(score_id).is_none())
                        || task
                            .badge_id
                            .is_some_and(|badge_id| self.store.badge(badge_id).is_none())
                }
            })
            .count()
    }

    /// Marks an assignment complete and refreshes the owning family's aggregates.
    pub fn complete_assignment(
        &mut self,
        family_task_id: FamilyTaskId,
        at: DateTime<Utc>,
    ) -> Result<FamilyTask, EngineError> {
        self.toggle_assignment(family_task_id, true, at)
    }

    /// Reopens an assignment; badges it granted disappear unless another completed task grants them.
    pub fn reopen_assignment(
        &mut self,
        family_task_id: FamilyTaskId,
        at: DateTime<Utc>,
    ) -> Result<FamilyTask, EngineError> {
        self.toggle_assignment(family_task_id, false, at)
    }

    fn toggle_assignment(
        &mut self,
        family_task_id: FamilyTaskId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<FamilyTask, EngineError> {
        let record = self.store.set_completion(family_task_id, completed, at)?;
        if self.store.family(record.family_id).is_some() {
            self.request_recompute(RecomputeScope::Family(record.family_id))?;
        }
        Ok(record)
    }

    /// Score, badges, and resolved level of a family within one category.
    pub fn family_state(
        &self,
        family_id: FamilyId,
        asset_type_id: AssetTypeId,
    ) -> Result<FamilyState, EngineError> {
        let score = self.family_score(family_id)?;
        let earned_badges = self.family_badges(family_id)?;
        let current_level =
            resolve_current_level(score, &earned_badges, asset_type_id, self.store.levels())
                .cloned();

        Ok(FamilyState {
            family_id,
            asset_type_id,
            score,
            earned_badges,
            current_level,
        })
    }

    pub fn current_level(
        &self,
        family_id: FamilyId,
        asset_type_id: AssetTypeId,
    ) -> Result<Option<Level>, EngineError> {
        if self.store.asset_type(asset_type_id).is_none() {
            return Err(EngineError::AssetTypeNotFound(asset_type_id));
        }
        Ok(self.family_state(family_id, asset_type_id)?.current_level)
    }

    pub fn evaluate_reward(
        &self,
        family_id: FamilyId,
        reward_id: RewardId,
    ) -> Result<RewardEvaluation, EngineError> {
        let reward = self
            .store
            .reward(reward_id)
            .ok_or(EngineError::RewardNotFound(reward_id))?;
        let state = self.family_state(family_id, reward.asset_type_id)?;
        Ok(RewardEvaluator::new(self.store.scores()).evaluate(&state, reward))
    }

    /// Evaluates every reward in store order for the family.
    pub fn reward_evaluations(
        &self,
        family_id: FamilyId,
    ) -> Result<Vec<RewardEvaluation>, EngineError> {
        self.require_family(family_id)?;
        let evaluator = RewardEvaluator::new(self.store.scores());
        let mut evaluations = Vec::with_capacity(self.store.rewards().len());
        for reward in self.store.rewards() {
            let state = self.family_state(family_id, reward.asset_type_id)?;
            evaluations.push(evaluator.evaluate(&state, reward));
        }
        Ok(evaluations)
    }

    pub fn eligible_rewards(
        &self,
        family_id: FamilyId,
    ) -> Result<Vec<RewardEvaluation>, EngineError> {
        Ok(self
            .reward_evaluations(family_id)?
            .into_iter()
            .filter(|evaluation| evaluation.eligible)
            .collect())
    }

    pub fn family_progress(&self, family_id: FamilyId) -> Result<FamilyProgress, EngineError> {
        let family = self
            .store
            .family(family_id)
            .ok_or(EngineError::FamilyNotFound(family_id))?;
        let score = self.family_score(family_id)?;
        let earned = self.family_badges(family_id)?;

        let earned_badges = earned
            .iter()
            .filter_map(|badge_id| self.store.badge(*badge_id))
            .map(|badge| EarnedBadge {
                badge_id: badge.id,
                title: badge.title.clone(),
                icon: badge.icon.clone(),
            })
            .collect();

        let current_levels = self
            .store
            .asset_types()
            .iter()
            .map(|asset_type| CategoryLevel {
                asset_type_id: asset_type.id,
                asset_type_name: asset_type.name.clone(),
                level: resolve_current_level(score, &earned, asset_type.id, self.store.levels())
                    .cloned(),
            })
            .collect();

        let available_levels = qualifying_levels(score, &earned, self.store.levels())
            .into_iter()
            .cloned()
            .collect();

        Ok(FamilyProgress {
            family_id,
            name: family.name.clone(),
            score,
            completed_tasks: completed_assignments(family_id, self.store.family_tasks()).count(),
            earned_badges,
            current_levels,
            available_levels,
        })
    }

    pub fn stats(&self) -> DashboardStats {
        report::dashboard_stats(&self.store)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        report::leaderboard(&self.store)
    }

    pub fn recent_activity(&self) -> Vec<RecentActivity> {
        report::recent_activity(&self.store, self.config.recent_activity_limit)
    }

    fn require_family(&self, family_id: FamilyId) -> Result<(), EngineError> {
        self.store
            .family(family_id)
            .map(|_| ())
            .ok_or(EngineError::FamilyNotFound(family_id))
    }
}
