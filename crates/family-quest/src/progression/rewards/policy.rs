use super::super::domain::RequirementPolicy;
use super::CriteriaOutcome;

/// Combines the per-criterion outcome under the reward's policy.
///
/// `any` needs at least one populated criterion to be met, so a reward with no
/// references at all is never eligible under it. Unrecognized policies are
/// evaluated as `all`.
pub(crate) fn decide_eligibility(policy: &RequirementPolicy, criteria: &CriteriaOutcome) -> bool {
    match policy.effective() {
        RequirementPolicy::Any => criteria.any_met(),
        RequirementPolicy::LevelOnly => criteria.level.holds(),
        RequirementPolicy::ScoreOnly => criteria.score.holds(),
        RequirementPolicy::BadgeOnly => criteria.badge.holds(),
        RequirementPolicy::All | RequirementPolicy::Unrecognized(_) => criteria.all_hold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::rewards::CriterionStatus;
    use crate::progression::rewards::CriterionStatus::{Met, NotRequired, Unmet};

    fn outcome(
        level: CriterionStatus,
        score: CriterionStatus,
        badge: CriterionStatus,
    ) -> CriteriaOutcome {
        CriteriaOutcome {
            level,
            score,
            badge,
        }
    }

    #[test]
    fn any_ignores_vacuous_criteria() {
        let criteria = outcome(NotRequired, Unmet, Unmet);
        assert!(!decide_eligibility(&RequirementPolicy::Any, &criteria));

        let criteria = outcome(NotRequired, Unmet, Met);
        assert!(decide_eligibility(&RequirementPolicy::Any, &criteria));
    }

    #[test]
    fn single_criterion_policies_ignore_other_fields() {
        let criteria = outcome(Met, Unmet, Unmet);
        assert!(decide_eligibility(&RequirementPolicy::LevelOnly, &criteria));
        assert!(!decide_eligibility(&RequirementPolicy::ScoreOnly, &criteria));
        assert!(!decide_eligibility(&RequirementPolicy::BadgeOnly, &criteria));
    }

    #[test]
    fn unrecognized_policy_requires_everything() {
        let policy = RequirementPolicy::Unrecognized("most".to_string());
        assert!(!decide_eligibility(&policy, &outcome(Met, Met, Unmet)));
        assert!(decide_eligibility(&policy, &outcome(Met, NotRequired, Met)));
    }
}
