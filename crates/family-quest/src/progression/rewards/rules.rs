use super::super::domain::{Reward, Score};
use super::{CriteriaOutcome, CriterionStatus, FamilyState};

fn status(met: bool) -> CriterionStatus {
    if met {
        CriterionStatus::Met
    } else {
        CriterionStatus::Unmet
    }
}

/// Checks each of the reward's three references against the family state.
///
/// A reference to a score record that no longer exists is unmet.
pub(crate) fn check_criteria(
    state: &FamilyState,
    reward: &Reward,
    scores: &[Score],
) -> CriteriaOutcome {
    let level = reward.level_id.map_or(CriterionStatus::NotRequired, |level_id| {
        let reached = state
            .current_level
            .as_ref()
            .is_some_and(|level| level.id == level_id);
        status(reached)
    });

    let score = reward.score_id.map_or(CriterionStatus::NotRequired, |score_id| {
        let met = scores
            .iter()
            .find(|candidate| candidate.id == score_id)
            .is_some_and(|threshold| state.score >= threshold.value_point);
        status(met)
    });

    let badge = reward.badge_id.map_or(CriterionStatus::NotRequired, |badge_id| {
        status(state.earned_badges.contains(&badge_id))
    });

    CriteriaOutcome {
        level,
        score,
        badge,
    }
}
