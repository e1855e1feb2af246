//! Simulation configuration file
//!
//! A TOML document listing blocks, processes and run options:
//!
//! ```toml
//! blocks = ["100 KB", "500 KB", "1 MB"]
//! processes = ["212 KB", "417 KB"]
//! strategies = ["first-fit", "best-fit"]   # default: all three
//! parallel = false
//! frames = false
//! format = "text"                          # or "json"
//! ```

use crate::core::allocator::Strategy;
use crate::core::error::{MemfitError, Result};
use crate::core::units::parse_size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = MemfitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(MemfitError::Config(format!(
                "invalid format '{}'. Valid options: text, json",
                s
            ))),
        }
    }
}

/// Parsed configuration, sizes still in token form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Block size tokens, e.g. "100 KB"
    #[validate(length(min = 1, message = "at least one block is required"))]
    pub blocks: Vec<String>,

    /// Process size tokens, in arrival order
    #[validate(length(min = 1, message = "at least one process is required"))]
    pub processes: Vec<String>,

    /// Strategy names; empty means all three
    #[serde(default)]
    pub strategies: Vec<String>,

    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub frames: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

impl SimulationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SimulationConfig =
            toml::from_str(source).map_err(|e| MemfitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let source = std::fs::read_to_string(path).map_err(|e| {
            MemfitError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Block sizes in KB
    pub fn block_sizes(&self) -> Result<Vec<u64>> {
        self.blocks.iter().map(|s| parse_size(s)).collect()
    }

    /// Process sizes in KB
    pub fn process_sizes(&self) -> Result<Vec<u64>> {
        self.processes.iter().map(|s| parse_size(s)).collect()
    }

    /// Strategies to run, defaulting to all of them
    ///
    /// Names that resolve to the same strategy are kept once, at their first
    /// position.
    pub fn strategy_list(&self) -> Result<Vec<Strategy>> {
        if self.strategies.is_empty() {
            return Ok(Strategy::ALL.to_vec());
        }

        let mut list = Vec::with_capacity(self.strategies.len());
        for name in &self.strategies {
            let strategy: Strategy = name.parse()?;
            if !list.contains(&strategy) {
                list.push(strategy);
            }
        }
        Ok(list)
    }
}
