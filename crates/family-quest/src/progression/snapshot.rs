use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AssetType, Badge, Family, FamilyTask, Level, Reward, Score, Task};

/// Plain-data document exchanged with the host dashboard.
///
/// Collection names follow the dashboard's stored JSON (`assetTypes`,
/// `familyTasks`, ...) so an existing document decodes without migration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub asset_types: Vec<AssetType>,
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub family_tasks: Vec<FamilyTask>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Snapshot {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Failures decoding or encoding a snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::domain::{BadgeId, FamilyId, RequirementPolicy, TaskId};

    const DASHBOARD_DOCUMENT: &str = r#"{
        "assetTypes": [{"id": 1, "name": "Household", "description": "Home", "created_at": "2025-01-01T00:00:00Z"}],
        "badges": [{"id": 1, "asset_type_id": 1, "title": "Clean Master", "description": "", "score_id": 1, "icon_url": "fas fa-broom"}],
        "scores": [{"id": 1, "asset_type_id": 1, "value_point": 10, "badge_id": 1}],
        "levels": [{"id": 1, "asset_type_id": 1, "level_number": 1, "name": "Beginner Helper", "required_points": 100, "required_badges": [1]}],
        "tasks": [{"id": 1, "title": "Clean Your Room", "description": "", "badge_id": 1, "score_id": 1}],
        "families": [{"id": 1, "name": "The Johnson Family", "sum_score": 0, "earned_badges": []}],
        "familyTasks": [{"id": 1, "family_id": 1, "task_id": 1, "is_completed": true, "completed_at": "2025-03-02T09:30:00.000Z", "assets_earned": 1}],
        "rewards": [{"id": 1, "asset_type_id": 1, "title": "Movie Night Choice", "level_id": 1, "score_id": 1, "badge_id": 1, "requirement_type": "all"}]
    }"#;

    #[test]
    fn decodes_dashboard_document() {
        let snapshot = Snapshot::from_json_str(DASHBOARD_DOCUMENT).expect("document decodes");

        assert_eq!(snapshot.asset_types.len(), 1);
        assert_eq!(snapshot.family_tasks[0].family_id, FamilyId(1));
        assert_eq!(snapshot.family_tasks[0].task_id, TaskId(1));
        assert!(snapshot.family_tasks[0].completed_at.is_some());
        assert!(snapshot.levels[0].required_badges.contains(&BadgeId(1)));
        assert_eq!(snapshot.rewards[0].requirement_type, RequirementPolicy::All);
    }

    #[test]
    fn missing_collections_decode_as_empty() {
        let snapshot = Snapshot::from_json_str(r#"{"families": []}"#).expect("decodes");
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn encoded_document_uses_dashboard_collection_names() {
        let snapshot = Snapshot::from_json_str(DASHBOARD_DOCUMENT).expect("document decodes");
        let encoded = snapshot.to_json_pretty().expect("encodes");

        assert!(encoded.contains("\"familyTasks\""));
        assert!(encoded.contains("\"assetTypes\""));
        assert!(encoded.contains("\"requirement_type\": \"all\""));
    }

    #[test]
    fn malformed_document_reports_json_error() {
        let err = Snapshot::from_json_str("{\"families\": 3}").expect_err("rejects");
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
