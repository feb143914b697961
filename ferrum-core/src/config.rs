//! World configuration, loaded from a JSON5 file.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{difficulty::Difficulty, game_mode::GameMode, level_type::LevelType};

const DEFAULT_CONFIG: &str = include_str!("../../package-content/ferrum_config.json5");

/// Ticks in one in-game day.
pub const TICKS_PER_DAY: i64 = 24_000;

/// An error raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or the default could not be written.
    #[error("config io: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 or has the wrong shape.
    #[error("config parse: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Settings for a single world.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Name used in logs and for saving.
    pub level_name: String,
    /// Dimension id advertised to clients.
    pub dimension: i8,
    /// Difficulty advertised to clients.
    pub difficulty: Difficulty,
    /// Game mode new players start in.
    pub default_gamemode: GameMode,
    /// Generator preset advertised to clients.
    pub level_type: LevelType,
    /// Target time between ticks.
    pub tick_interval_ms: u64,
    /// Chunks are saved every this many ticks.
    pub save_interval_ticks: u64,
    /// Time of day the world starts at, in `0..24000`.
    pub initial_world_time: i64,
    /// Seed for weather changes, random when unset.
    pub weather_seed: Option<u64>,
    /// Nested physics notifications beyond this depth are dropped. Unbounded when unset.
    pub max_physics_depth: Option<u32>,
}

impl WorldConfig {
    /// Reads the config at `path`, writing the bundled default first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let config_str = fs::read_to_string(path)?;
            serde_json5::from_str::<WorldConfig>(&config_str)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            serde_json5::from_str::<WorldConfig>(DEFAULT_CONFIG)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid("Tick interval must be in range 1..=1000 ms"));
        }
        if self.save_interval_ticks == 0 {
            return Err(ConfigError::Invalid("Save interval must be at least one tick"));
        }
        if !(0..TICKS_PER_DAY).contains(&self.initial_world_time) {
            return Err(ConfigError::Invalid("Initial world time must be in range 0..24000"));
        }
        if self.max_physics_depth == Some(0) {
            return Err(ConfigError::Invalid("Physics depth cap must be at least 1"));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            level_name: "world".to_string(),
            dimension: 0,
            difficulty: Difficulty::Normal,
            default_gamemode: GameMode::Survival,
            level_type: LevelType::Default,
            tick_interval_ms: 50,
            save_interval_ticks: 3000,
            initial_world_time: 1200,
            weather_seed: None,
            max_physics_depth: None,
        }
    }
}
