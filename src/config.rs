//! Query configuration from LSP initialization options and the environment

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub const MISSING_POSITION_ENV: &str = "INFOTREE_MISSING_POSITION";
pub const LOG_LEVEL_ENV: &str = "INFOTREE_LOG_LEVEL";

/// How span ranking treats a candidate without a start or end position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPositionPolicy {
    /// Leave the candidate out of the ranking
    #[default]
    Filter,
    /// Fail the query with `QueryError::MissingPosition`
    Strict,
}

impl FromStr for MissingPositionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filter" => Ok(Self::Filter),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue {
                key: "missingPosition",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    pub missing_position: MissingPositionPolicy,
    pub log_level: Option<String>,
    pub file_logging: bool,
    /// Session log directory; the user cache directory when unset
    pub log_dir: Option<PathBuf>,
}

impl QueryConfig {
    /// Resolve configuration from initialization options, then environment overrides
    ///
    /// Checks in order:
    /// 1. `initializationOptions` JSON (unknown keys are ignored)
    /// 2. Environment variables INFOTREE_MISSING_POSITION and INFOTREE_LOG_LEVEL
    pub fn from_env_or_init(init: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        Self::resolve(init, |key| std::env::var(key).ok())
    }

    fn resolve<F>(init: Option<&serde_json::Value>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match init {
            Some(value) if !value.is_null() => Self::deserialize(value)?,
            _ => Self::default(),
        };

        if let Some(policy) = env(MISSING_POSITION_ENV) {
            match policy.parse() {
                Ok(policy) => config.missing_position = policy,
                Err(e) => warn!("Ignoring {}: {}", MISSING_POSITION_ENV, e),
            }
        }

        if let Some(level) = env(LOG_LEVEL_ENV) {
            config.log_level = Some(level);
        }

        Ok(config)
    }
}
