use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use constellation_core::models::MissionProfile;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "constellation";
const CONFIG_FILE: &str = "config.json";

/// Log line format written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    /// Satellites need strictly more charge than this to activate.
    pub activation_threshold: f64,
    /// Charge spent per relay mission.
    pub relay_cost: f64,
    /// Charge spent per imaging mission.
    pub imaging_cost: f64,
    /// Seed for random initial charges. Random every run when unset.
    pub seed: Option<u64>,
    /// Print a human-readable line for every operation.
    pub narrate: bool,
    pub log_format: LogFormat,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            activation_threshold: MissionProfile::DEFAULT_ACTIVATION_THRESHOLD,
            relay_cost: MissionProfile::DEFAULT_RELAY_COST,
            imaging_cost: MissionProfile::DEFAULT_IMAGING_COST,
            seed: None,
            narrate: false,
            log_format: LogFormat::Text,
        }
    }
}

impl OpsConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.profile().context("Invalid mission profile in config file")?;

        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn profile(&self) -> Result<MissionProfile> {
        Ok(MissionProfile::new(
            self.activation_threshold,
            self.relay_cost,
            self.imaging_cost,
        )?)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
