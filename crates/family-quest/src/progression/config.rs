use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_POINT_VALUE: u32 = 1000;
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 5;

/// Tunables injected into the store and engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inclusive upper bound accepted for `Score::value_point`.
    pub max_point_value: u32,
    /// Entries returned by the recent activity feed.
    pub recent_activity_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_point_value: DEFAULT_MAX_POINT_VALUE,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
        }
    }
}
