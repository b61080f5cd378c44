use std::collections::BTreeSet;

use super::domain::{AssetTypeId, BadgeId, Level};

/// Points threshold plus every required badge (AND semantics, no partial credit).
pub fn satisfies_level(score: u32, earned_badges: &BTreeSet<BadgeId>, level: &Level) -> bool {
    if score < level.required_points {
        return false;
    }

    level.required_badges.is_subset(earned_badges)
}

/// Highest-threshold level of the category the family currently satisfies.
///
/// Levels are scanned in ascending `required_points` order and the last one
/// passing wins; among equal thresholds the later record in store order wins.
pub fn resolve_current_level<'a>(
    score: u32,
    earned_badges: &BTreeSet<BadgeId>,
    asset_type_id: AssetTypeId,
    levels: &'a [Level],
) -> Option<&'a Level> {
    let mut ordered: Vec<&Level> = levels
        .iter()
        .filter(|level| level.asset_type_id == asset_type_id)
        .collect();
    ordered.sort_by_key(|level| level.required_points);

    let mut current = None;
    for level in ordered {
        if satisfies_level(score, earned_badges, level) {
            current = Some(level);
        }
    }
    current
}

/// Every level, across all categories, the family currently satisfies.
pub fn qualifying_levels<'a>(
    score: u32,
    earned_badges: &BTreeSet<BadgeId>,
    levels: &'a [Level],
) -> Vec<&'a Level> {
    levels
        .iter()
        .filter(|level| satisfies_level(score, earned_badges, level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::domain::LevelId;

    fn level(id: u32, points: u32, badges: &[u32]) -> Level {
        Level {
            id: LevelId(id),
            asset_type_id: AssetTypeId(1),
            level_number: id,
            name: format!("level-{id}"),
            required_points: points,
            required_badges: badges.iter().copied().map(BadgeId).collect(),
        }
    }

    #[test]
    fn equal_thresholds_resolve_to_later_record() {
        let levels = vec![level(1, 50, &[]), level(2, 50, &[])];
        let current = resolve_current_level(60, &BTreeSet::new(), AssetTypeId(1), &levels)
            .expect("level resolves");
        assert_eq!(current.id, LevelId(2));
    }

    #[test]
    fn store_order_does_not_affect_threshold_order() {
        let levels = vec![level(3, 300, &[]), level(1, 100, &[]), level(2, 200, &[])];
        let current = resolve_current_level(250, &BTreeSet::new(), AssetTypeId(1), &levels)
            .expect("level resolves");
        assert_eq!(current.id, LevelId(2));
    }
}
