//! Configuration loading for the ThreatLens CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tl_core::SeverityLattice;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the enriched-alerts JSON input.
    #[serde(default = "default_alerts_path")]
    pub alerts_path: PathBuf,

    /// Path the scored snapshot is written to.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Optional threat-intel tables file; the builtin mock feed is used
    /// when absent.
    #[serde(default)]
    pub intel_path: Option<PathBuf>,

    /// Whether to run the mock enrichment stage before hunting.
    #[serde(default)]
    pub enrich: bool,

    /// Severity lattice used by the scoring stage.
    #[serde(default)]
    pub lattice: SeverityLattice,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

fn default_alerts_path() -> PathBuf {
    PathBuf::from("data/enriched_alerts.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/ttp_mappings_with_scores.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alerts_path: default_alerts_path(),
            output_path: default_output_path(),
            intel_path: None,
            enrich: false,
            lattice: SeverityLattice::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to a YAML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to emit JSON-formatted logs.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
