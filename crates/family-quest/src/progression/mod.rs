//! Family progression rules: score and badge aggregation, level resolution,
//! and reward eligibility over an in-memory entity store.
//!
//! Every answer is derived from the assignment records. The cached
//! `Family::sum_score`/`Family::earned_badges` fields are refreshed only when
//! the host asks the engine to recompute.

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod engine;
pub mod levels;
pub mod report;
pub mod rewards;
pub mod sample;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregate::{compute_family_badges, compute_family_score};
pub use config::EngineConfig;
pub use domain::{
    AssetType, AssetTypeId, Badge, BadgeId, Family, FamilyId, FamilyTask, FamilyTaskId, Level,
    LevelId, RequirementPolicy, Reward, RewardId, Score, ScoreId, Task, TaskId,
};
pub use engine::{EngineError, ProgressionEngine, RecomputeScope};
pub use levels::{qualifying_levels, resolve_current_level, satisfies_level};
pub use report::{
    CategoryLevel, DashboardStats, EarnedBadge, FamilyProgress, LeaderboardEntry, RecentActivity,
};
pub use rewards::{
    evaluate_reward, CriteriaOutcome, CriterionStatus, FamilyState, RewardEvaluation,
    RewardEvaluator,
};
pub use sample::sample_snapshot;
pub use snapshot::{Snapshot, SnapshotError};
pub use store::{
    can_delete_score, is_task_valid, CascadeSummary, EntityKind, EntityStore, NewBadge, NewLevel,
    NewReward, NewScore, NewTask, StoreError,
};
