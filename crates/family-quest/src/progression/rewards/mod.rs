mod policy;
mod rules;

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{
    AssetTypeId, BadgeId, FamilyId, Level, RequirementPolicy, Reward, RewardId, Score,
};
use policy::decide_eligibility;
use rules::check_criteria;

/// A family's resolved progress within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyState {
    pub family_id: FamilyId,
    pub asset_type_id: AssetTypeId,
    pub score: u32,
    pub earned_badges: BTreeSet<BadgeId>,
    pub current_level: Option<Level>,
}

/// Outcome of a single reward criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    /// The reward leaves this reference unset.
    NotRequired,
    Met,
    Unmet,
}

impl CriterionStatus {
    /// Unset references hold vacuously.
    pub const fn holds(self) -> bool {
        !matches!(self, Self::Unmet)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotRequired => "not required",
            Self::Met => "met",
            Self::Unmet => "unmet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriteriaOutcome {
    pub level: CriterionStatus,
    pub score: CriterionStatus,
    pub badge: CriterionStatus,
}

impl CriteriaOutcome {
    fn statuses(&self) -> [CriterionStatus; 3] {
        [self.level, self.score, self.badge]
    }

    pub fn all_hold(&self) -> bool {
        self.statuses().iter().all(|status| status.holds())
    }

    pub fn any_met(&self) -> bool {
        self.statuses().contains(&CriterionStatus::Met)
    }
}

/// Eligibility verdict for one reward, with the display text for its policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardEvaluation {
    pub reward_id: RewardId,
    pub title: String,
    pub policy: RequirementPolicy,
    pub criteria: CriteriaOutcome,
    pub eligible: bool,
    pub explanation: &'static str,
}

/// Stateless evaluator over the score records a reward may point at.
pub struct RewardEvaluator<'a> {
    scores: &'a [Score],
}

impl<'a> RewardEvaluator<'a> {
    pub fn new(scores: &'a [Score]) -> Self {
        Self { scores }
    }

    pub fn evaluate(&self, state: &FamilyState, reward: &Reward) -> RewardEvaluation {
        let criteria = check_criteria(state, reward, self.scores);
        let eligible = decide_eligibility(&reward.requirement_type, &criteria);

        RewardEvaluation {
            reward_id: reward.id,
            title: reward.title.clone(),
            policy: reward.requirement_type.clone(),
            criteria,
            eligible,
            explanation: reward.requirement_type.explanation(),
        }
    }
}

/// Free-function form of [`RewardEvaluator::evaluate`].
pub fn evaluate_reward(
    state: &FamilyState,
    reward: &Reward,
    scores: &[Score],
) -> RewardEvaluation {
    RewardEvaluator::new(scores).evaluate(state, reward)
}
