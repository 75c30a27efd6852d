//! Configuration for tickgraph
//!
//! A [`PipelineConfig`] controls the parts of a pipeline that are not graph
//! structure: the name used when rendering it, an optional tick limit for
//! [`Pipeline::drive`](crate::pipeline::Pipeline::drive), and the default log
//! filter. Files are TOML; every field is optional.
//!
//! # Example
//!
//! ```toml
//! graph_name = "ingest"
//! tick_limit = 10000
//! log_filter = "info,tickgraph=debug"
//! ```

use crate::error::{Result, TickGraphError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default graph name in DOT output
pub const DEFAULT_GRAPH_NAME: &str = "G";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for a [`Pipeline`](crate::pipeline::Pipeline)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name written in the `digraph` header
    pub graph_name: String,

    /// Maximum ticks for `drive`; `None` runs until quiescent
    pub tick_limit: Option<u64>,

    /// Filter used by [`crate::logging::init`] when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            tick_limit: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TickGraphError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TickGraphError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TickGraphError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TickGraphError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TickGraphError::Config(format!("Failed to write config: {}", e)))
    }
}
