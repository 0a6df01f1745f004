//! Game configuration
//!
//! Read from a JSON file (any missing field falls back to its default) and
//! then overridden from the command line.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a configuration could not be used
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid JSON for `GameConfig`
    Parse(serde_json::Error),
    /// Values that would make the game unplayable
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "malformed config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Window and gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Difficulty multiplier, carried for frontends; the simulation does not read it
    pub difficulty: f32,
    /// Multiplier on the base horizontal speed
    pub player_speed: f32,
    /// Verbose logging and state snapshots on game over
    pub debug: bool,
    /// RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Directory holding the sprite images
    pub asset_root: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fullscreen: false,
            difficulty: 1.0,
            player_speed: 5.0,
            debug: false,
            seed: None,
            asset_root: PathBuf::from("material"),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject sizes and speeds the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = PLATFORM_WIDTH.max(PLAYER_WIDTH);
        if (self.width as f32) <= min_width {
            return Err(ConfigError::Invalid(format!(
                "width {} must exceed {}",
                self.width, min_width
            )));
        }
        if self.height == 0 {
            return Err(ConfigError::Invalid("height must be positive".into()));
        }
        if !self.difficulty.is_finite() || self.difficulty <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "difficulty {} must be positive",
                self.difficulty
            )));
        }
        if !self.player_speed.is_finite() || self.player_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player_speed {} must be positive",
                self.player_speed
            )));
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}
