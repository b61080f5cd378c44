use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a collection-scoped record identifier backed by a positive integer.
macro_rules! record_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(AssetTypeId, "Identifier of a top-level category.");
record_id!(BadgeId, "Identifier of an achievement badge.");
record_id!(ScoreId, "Identifier of a point value record.");
record_id!(TaskId, "Identifier of an assignable task.");
record_id!(LevelId, "Identifier of a progression tier.");
record_id!(RewardId, "Identifier of an unlockable reward.");
record_id!(FamilyId, "Identifier of a tracked family.");
record_id!(FamilyTaskId, "Identifier of a family's task assignment.");

/// Top-level category (e.g. "Household") owning levels, badges, scores and rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetType {
    pub id: AssetTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Point value, optionally tagged as belonging to a single badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub id: ScoreId,
    pub asset_type_id: AssetTypeId,
    pub value_point: u32,
    #[serde(default)]
    pub badge_id: Option<BadgeId>,
}

/// Achievement marker earned by completing a task that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub asset_type_id: AssetTypeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "icon_url")]
    pub icon: String,
    /// Legacy pointer kept for document compatibility; associations live on `Score::badge_id`.
    #[serde(default)]
    pub score_id: Option<ScoreId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub badge_id: Option<BadgeId>,
    #[serde(default)]
    pub score_id: Option<ScoreId>,
}

impl Task {
    /// A task must grant at least a badge or a score.
    pub fn is_valid(&self) -> bool {
        self.badge_id.is_some() || self.score_id.is_some()
    }

    /// Number of asset references carried by the task (0..=2).
    pub fn asset_count(&self) -> u32 {
        u32::from(self.badge_id.is_some()) + u32::from(self.score_id.is_some())
    }
}

/// Ordered progression tier within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub asset_type_id: AssetTypeId,
    pub level_number: u32,
    pub name: String,
    pub required_points: u32,
    #[serde(default)]
    pub required_badges: BTreeSet<BadgeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    pub asset_type_id: AssetTypeId,
    pub title: String,
    #[serde(default)]
    pub level_id: Option<LevelId>,
    #[serde(default)]
    pub score_id: Option<ScoreId>,
    #[serde(default)]
    pub badge_id: Option<BadgeId>,
    #[serde(default)]
    pub requirement_type: RequirementPolicy,
}

/// Subject whose progress is tracked. `sum_score` and `earned_badges` are
/// materialized views refreshed by the engine, never the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    #[serde(default)]
    pub sum_score: u32,
    #[serde(default)]
    pub earned_badges: BTreeSet<BadgeId>,
}

/// One family's assignment/completion record for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTask {
    pub id: FamilyTaskId,
    pub family_id: FamilyId,
    pub task_id: TaskId,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets_earned: u32,
}

/// How a reward's three optional criteria combine into eligibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum RequirementPolicy {
    #[default]
    All,
    Any,
    LevelOnly,
    ScoreOnly,
    BadgeOnly,
    /// A policy string this engine does not know; evaluated as `All`.
    Unrecognized(String),
}

impl RequirementPolicy {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::All,
            Self::Any,
            Self::LevelOnly,
            Self::ScoreOnly,
            Self::BadgeOnly,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::LevelOnly => "level_only",
            Self::ScoreOnly => "score_only",
            Self::BadgeOnly => "badge_only",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Policy actually applied during evaluation.
    pub fn effective(&self) -> Self {
        match self {
            Self::Unrecognized(_) => Self::All,
            known => known.clone(),
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self.effective() {
            Self::Any => "Any one requirement is enough",
            Self::LevelOnly => "Level requirement only",
            Self::ScoreOnly => "Score requirement only",
            Self::BadgeOnly => "Badge requirement only",
            Self::All | Self::Unrecognized(_) => "All requirements must be met",
        }
    }
}

impl From<&str> for RequirementPolicy {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "any" => Self::Any,
            "level_only" => Self::LevelOnly,
            "score_only" => Self::ScoreOnly,
            "badge_only" => Self::BadgeOnly,
            _ => Self::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for RequirementPolicy {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Option<String>> for RequirementPolicy {
    fn from(value: Option<String>) -> Self {
        value
            .map(|raw| Self::from(raw.as_str()))
            .unwrap_or_default()
    }
}

impl From<RequirementPolicy> for String {
    fn from(value: RequirementPolicy) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RequirementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
