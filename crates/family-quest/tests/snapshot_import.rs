use std::collections::BTreeSet;
use std::path::PathBuf;

use family_quest::progression::{
    AssetTypeId, BadgeId, RequirementPolicy, RewardId, Snapshot, SnapshotError,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/dashboard.json")
}

#[test]
fn dashboard_export_decodes_every_collection() {
    let snapshot = Snapshot::from_path(fixture_path()).expect("fixture decodes");

    assert_eq!(snapshot.asset_types.len(), 2);
    assert_eq!(snapshot.badges.len(), 3);
    assert_eq!(snapshot.scores.len(), 4);
    assert_eq!(snapshot.levels.len(), 3);
    assert_eq!(snapshot.tasks.len(), 4);
    assert_eq!(snapshot.families.len(), 2);
    assert_eq!(snapshot.family_tasks.len(), 4);
    assert_eq!(snapshot.rewards.len(), 5);

    assert_eq!(snapshot.badges[0].icon, "fas fa-broom");
    assert_eq!(snapshot.levels[1].asset_type_id, AssetTypeId(1));
    assert_eq!(
        snapshot.levels[1].required_badges,
        [BadgeId(1), BadgeId(2)].into_iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn reward_policies_decode_with_fallbacks() {
    let snapshot = Snapshot::from_path(fixture_path()).expect("fixture decodes");
    let policy = |id: u32| {
        snapshot
            .rewards
            .iter()
            .find(|reward| reward.id == RewardId(id))
            .map(|reward| reward.requirement_type.clone())
            .expect("reward present")
    };

    assert_eq!(policy(2), RequirementPolicy::LevelOnly);
    assert_eq!(policy(3), RequirementPolicy::Any);
    assert_eq!(policy(4), RequirementPolicy::All);
    assert_eq!(policy(5), RequirementPolicy::Unrecognized("mystery".to_string()));
}

#[test]
fn encoded_snapshot_decodes_to_the_same_document() {
    let snapshot = Snapshot::from_path(fixture_path()).expect("fixture decodes");

    let encoded = snapshot.to_json_pretty().expect("encodes");
    let decoded = Snapshot::from_json_str(&encoded).expect("re-decodes");

    assert_eq!(decoded, snapshot);
}

#[test]
fn missing_file_reports_path() {
    let err = Snapshot::from_path("does/not/exist.json").expect_err("missing file");

    match &err {
        SnapshotError::Io { path, .. } => assert_eq!(path, "does/not/exist.json"),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(err.to_string().contains("does/not/exist.json"));
}
