//! Simulation settings
//!
//! Balance constants and startup options, loadable from a JSON file. Missing
//! fields fall back to the defaults in [`crate::consts`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::persistence::DEFAULT_LOG_PATH;
use crate::sim::collision::CollisionRules;
use crate::sim::progression::Progression;
use crate::sim::spawn::SpawnRates;
use crate::sim::state::{Position, Ship};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    // === Grid ===
    pub width: u32,
    pub height: u32,

    // === Run ===
    /// Seed for the spawn RNG
    pub seed: u64,
    /// Narrate movement, damage, spawns and level-ups
    pub verbose: bool,
    /// Where mastered achievements are appended
    pub achievement_log: PathBuf,

    // === Ship ===
    pub ship_start_x: i32,
    pub ship_start_y: i32,
    pub ship_max_health: i32,

    // === Spawning & leveling ===
    pub start_spawn_rate: u32,
    pub spawn_rate_increase: u32,
    pub score_threshold: u32,
    pub enemy_spawn_factor: f64,
    pub power_up_spawn_factor: f64,
    pub drift_interval: u64,

    // === Collisions ===
    pub asteroid_damage: i32,
    pub enemy_damage: i32,
    pub shield_score_bonus: u32,
    pub health_restore: i32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,

            seed: 0,
            verbose: false,
            achievement_log: PathBuf::from(DEFAULT_LOG_PATH),

            ship_start_x: SHIP_START_X,
            ship_start_y: SHIP_START_Y,
            ship_max_health: SHIP_MAX_HEALTH,

            start_spawn_rate: START_SPAWN_RATE,
            spawn_rate_increase: SPAWN_RATE_INCREASE,
            score_threshold: SCORE_THRESHOLD,
            enemy_spawn_factor: ENEMY_SPAWN_FACTOR,
            power_up_spawn_factor: POWER_UP_SPAWN_FACTOR,
            drift_interval: DRIFT_INTERVAL,

            asteroid_damage: ASTEROID_DAMAGE,
            enemy_damage: ENEMY_DAMAGE,
            shield_score_bonus: SHIELD_SCORE_BONUS,
            health_restore: HEALTH_RESTORE,
        }
    }
}

impl SimSettings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.ship_start().in_bounds(self.width, self.height) {
            return Err(ConfigError::Invalid(format!(
                "ship start ({}, {}) is outside the grid",
                self.ship_start_x, self.ship_start_y
            )));
        }
        if self.ship_max_health <= 0 {
            return Err(ConfigError::Invalid("ship_max_health must be positive".into()));
        }
        if self.start_spawn_rate > 100 {
            return Err(ConfigError::Invalid(format!(
                "start_spawn_rate is a percentage, got {}",
                self.start_spawn_rate
            )));
        }
        if self.drift_interval == 0 {
            return Err(ConfigError::Invalid("drift_interval must be at least 1".into()));
        }
        for (field, value) in [
            ("asteroid_damage", self.asteroid_damage),
            ("enemy_damage", self.enemy_damage),
            ("health_restore", self.health_restore),
        ] {
            if value < 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    pub fn ship_start(&self) -> Position {
        Position::new(self.ship_start_x, self.ship_start_y)
    }

    pub fn ship(&self) -> Ship {
        Ship::new(self.ship_start(), self.ship_max_health)
    }

    pub fn progression(&self) -> Progression {
        Progression::new(
            self.start_spawn_rate,
            self.score_threshold,
            self.spawn_rate_increase,
        )
    }

    pub fn spawn_rates(&self) -> SpawnRates {
        SpawnRates {
            enemy_factor: self.enemy_spawn_factor,
            power_up_factor: self.power_up_spawn_factor,
        }
    }

    pub fn collision_rules(&self) -> CollisionRules {
        CollisionRules {
            asteroid_damage: self.asteroid_damage,
            enemy_damage: self.enemy_damage,
            shield_score_bonus: self.shield_score_bonus,
            health_restore: self.health_restore,
        }
    }
}
