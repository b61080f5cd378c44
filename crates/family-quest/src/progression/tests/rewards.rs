use super::common::*;
use crate::progression::domain::{
    BadgeId, LevelId, RequirementPolicy, Reward, RewardId, Score, ScoreId,
};
use crate::progression::rewards::{evaluate_reward, CriterionStatus, RewardEvaluator};

fn reward(
    policy: RequirementPolicy,
    level_id: Option<LevelId>,
    score_id: Option<ScoreId>,
    badge_id: Option<BadgeId>,
) -> Reward {
    Reward {
        id: RewardId(1),
        asset_type_id: HOUSEHOLD,
        title: "Movie Night Choice".to_string(),
        level_id,
        score_id,
        badge_id,
        requirement_type: policy,
    }
}

fn thresholds() -> Vec<Score> {
    vec![
        Score {
            id: ScoreId(1),
            asset_type_id: HOUSEHOLD,
            value_point: 10,
            badge_id: None,
        },
        Score {
            id: ScoreId(9),
            asset_type_id: HOUSEHOLD,
            value_point: 30,
            badge_id: None,
        },
    ]
}

#[test]
fn level_only_ignores_populated_score_reference() {
    let l3 = bare_level(3, 0, &[]);
    let state = state(0, &[], Some(l3));
    let reward = reward(
        RequirementPolicy::LevelOnly,
        Some(LevelId(3)),
        Some(ScoreId(9)),
        None,
    );

    let evaluation = evaluate_reward(&state, &reward, &thresholds());

    assert!(evaluation.eligible);
    assert_eq!(evaluation.criteria.level, CriterionStatus::Met);
    assert_eq!(evaluation.criteria.score, CriterionStatus::Unmet);
    assert_eq!(evaluation.explanation, "Level requirement only");
}

#[test]
fn reward_without_references_depends_on_policy() {
    let state = state(0, &[], None);
    let scores = thresholds();
    let evaluator = RewardEvaluator::new(&scores);

    assert!(!evaluator.evaluate(&state, &reward(RequirementPolicy::Any, None, None, None)).eligible);
    assert!(evaluator.evaluate(&state, &reward(RequirementPolicy::All, None, None, None)).eligible);
    assert!(evaluator
        .evaluate(&state, &reward(RequirementPolicy::BadgeOnly, None, None, None))
        .eligible);
}

#[test]
fn score_criterion_compares_against_threshold_value() {
    let scores = thresholds();
    let reward = reward(RequirementPolicy::ScoreOnly, None, Some(ScoreId(9)), None);

    assert!(!evaluate_reward(&state(29, &[], None), &reward, &scores).eligible);
    assert!(evaluate_reward(&state(30, &[], None), &reward, &scores).eligible);
}

#[test]
fn dangling_score_reference_is_unmet() {
    let reward = reward(RequirementPolicy::ScoreOnly, None, Some(ScoreId(404)), None);

    let evaluation = evaluate_reward(&state(1_000, &[], None), &reward, &thresholds());

    assert!(!evaluation.eligible);
    assert_eq!(evaluation.criteria.score, CriterionStatus::Unmet);
}

#[test]
fn level_criterion_requires_the_resolved_level() {
    let reached = bare_level(2, 0, &[]);
    let reward = reward(RequirementPolicy::LevelOnly, Some(LevelId(1)), None, None);

    let evaluation = evaluate_reward(&state(500, &[], Some(reached)), &reward, &thresholds());

    assert!(!evaluation.eligible);
}

#[test]
fn all_policy_needs_every_populated_reference() {
    let reward = reward(
        RequirementPolicy::All,
        None,
        Some(ScoreId(1)),
        Some(CLEAN_MASTER),
    );
    let scores = thresholds();

    assert!(!evaluate_reward(&state(10, &[], None), &reward, &scores).eligible);
    assert!(evaluate_reward(&state(10, &[CLEAN_MASTER], None), &reward, &scores).eligible);
}

#[test]
fn any_policy_accepts_a_single_met_reference() {
    let reward = reward(
        RequirementPolicy::Any,
        None,
        Some(ScoreId(9)),
        Some(CLEAN_MASTER),
    );

    let evaluation = evaluate_reward(&state(0, &[CLEAN_MASTER], None), &reward, &thresholds());

    assert!(evaluation.eligible);
    assert_eq!(evaluation.explanation, "Any one requirement is enough");
}

#[test]
fn unknown_policy_falls_back_to_all() {
    let reward = reward(
        RequirementPolicy::from("most"),
        None,
        Some(ScoreId(1)),
        Some(CLEAN_MASTER),
    );

    let evaluation = evaluate_reward(&state(50, &[], None), &reward, &thresholds());

    assert!(!evaluation.eligible);
    assert_eq!(evaluation.explanation, "All requirements must be met");
    assert_eq!(evaluation.policy.as_str(), "most");
}

#[test]
fn policy_names_are_case_sensitive() {
    let reward = reward(
        RequirementPolicy::from("ANY"),
        None,
        Some(ScoreId(9)),
        Some(CLEAN_MASTER),
    );

    let evaluation = evaluate_reward(&state(0, &[CLEAN_MASTER], None), &reward, &thresholds());

    assert!(!evaluation.eligible);
    assert_eq!(evaluation.explanation, "All requirements must be met");
    assert_eq!(evaluation.policy.as_str(), "ANY");
}
