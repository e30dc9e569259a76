//! Runtime configuration, read from a RON file.
//!
//! Every field has a default, so an empty file (or `()`) is a valid config.
//! Gameplay constants are not configurable; see `constants`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::TOTAL_LEVELS;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Level highlighted when the menu first opens.
    pub start_level: u32,
    pub fog_of_war: bool,
    /// Regenerate levels until the door is reachable from the start.
    pub require_connected_levels: bool,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 1,
            fog_of_war: true,
            require_connected_levels: false,
            log_file: PathBuf::from("cellular_scape.log"),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents).map_err(|err| match err {
            ConfigError::Parse { details, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                details,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=TOTAL_LEVELS).contains(&self.start_level) {
            return Err(ConfigError::StartLevelOutOfRange {
                level: self.start_level,
                total: TOTAL_LEVELS,
            });
        }
        Ok(())
    }
}
