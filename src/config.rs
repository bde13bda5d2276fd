//! Runtime configuration
//!
//! Loaded from YAML. Every field has a default so a partial (or empty)
//! document is valid.

use crate::bridge::ActiveContext;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// What `distinct(keep_all = false)` does to the grouping of the table it trims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistinctGrouping {
    /// Regroup on the grouping columns that survive the trim; drop the
    /// grouping if none survive
    #[default]
    Recompute,
    /// Drop the grouping
    Drop,
}

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelGraphConfig {
    /// Grouping policy after a trimming distinct
    pub distinct_grouping: DistinctGrouping,

    /// Context a new graph starts in
    pub default_context: ActiveContext,

    /// Direction for JSON input that does not say
    pub directed: bool,
}

impl Default for RelGraphConfig {
    fn default() -> Self {
        Self {
            distinct_grouping: DistinctGrouping::Recompute,
            default_context: ActiveContext::Nodes,
            directed: true,
        }
    }
}

impl RelGraphConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
