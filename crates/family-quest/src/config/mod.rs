use std::env;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::progression::config::{DEFAULT_MAX_POINT_VALUE, DEFAULT_RECENT_ACTIVITY_LIMIT};
use crate::progression::EngineConfig;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
    /// Snapshot document used when the command line names none.
    pub snapshot_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let snapshot_path = env::var("QUEST_SNAPSHOT_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let max_point_value =
            parse_var("QUEST_MAX_POINT_VALUE", DEFAULT_MAX_POINT_VALUE as u64)?;
        let max_point_value = u32::try_from(max_point_value)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::OutOfRange {
                name: "QUEST_MAX_POINT_VALUE",
            })?;
        let recent_activity_limit = parse_var(
            "QUEST_RECENT_ACTIVITY_LIMIT",
            DEFAULT_RECENT_ACTIVITY_LIMIT as u64,
        )?;
        let recent_activity_limit =
            usize::try_from(recent_activity_limit).map_err(|_| ConfigError::OutOfRange {
                name: "QUEST_RECENT_ACTIVITY_LIMIT",
            })?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig {
                max_point_value,
                recent_activity_limit,
            },
            snapshot_path,
        })
    }
}

fn parse_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { name, source }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        name: &'static str,
        source: ParseIntError,
    },
    OutOfRange {
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, .. } => {
                write!(f, "{name} must be a non-negative integer")
            }
            ConfigError::OutOfRange { name } => write!(f, "{name} is outside the allowed range"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { source, .. } => Some(source),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}
