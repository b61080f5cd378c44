use chrono::Utc;
use family_quest::config::AppConfig;
use family_quest::error::AppError;
use family_quest::progression::{sample_snapshot, ProgressionEngine, Snapshot};
use std::fmt;
use std::path::PathBuf;

/// Where the CLI reads its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SnapshotSource {
    File(PathBuf),
    Sample,
}

impl SnapshotSource {
    /// The command-line path wins over the configured one; with neither, the sample is used.
    pub(crate) fn resolve(flag: Option<PathBuf>, configured: Option<PathBuf>) -> Self {
        flag.or(configured).map_or(Self::Sample, Self::File)
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::File(path) => write!(f, "{}", path.display()),
            SnapshotSource::Sample => write!(f, "built-in sample"),
        }
    }
}

pub(crate) fn load_engine(
    source: &SnapshotSource,
    config: &AppConfig,
) -> Result<ProgressionEngine, AppError> {
    let snapshot = match source {
        SnapshotSource::File(path) => Snapshot::from_path(path)?,
        SnapshotSource::Sample => sample_snapshot(Utc::now()),
    };
    Ok(ProgressionEngine::from_snapshot(
        snapshot,
        config.engine.clone(),
    ))
}
