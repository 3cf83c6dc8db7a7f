//! Void Runner - A grid arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, leveling, tick driver)
//! - `achievements`: Progress trackers with tiers and one-time mastery logging
//! - `stats`: Shot and survival statistics
//! - `persistence`: Append-only achievement log sinks
//! - `narration`: Injected text sink for human-readable tick narration
//! - `settings`: Data-driven game balance and startup options

pub mod achievements;
pub mod error;
pub mod narration;
pub mod persistence;
pub mod report;
pub mod settings;
pub mod sim;
pub mod stats;

pub use achievements::{Achievement, AchievementEngine, Tier};
pub use error::{BoundsError, ConfigError, ValidationError};
pub use settings::SimSettings;
pub use sim::{Simulation, TickReport};
pub use stats::StatsTracker;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_WIDTH: u32 = 10;
    pub const GRID_HEIGHT: u32 = 20;

    /// Ship defaults
    pub const SHIP_START_X: i32 = 5;
    pub const SHIP_START_Y: i32 = 10;
    pub const SHIP_MAX_HEALTH: i32 = 100;

    /// Spawn rate (percentage chance per tick of an asteroid)
    pub const START_SPAWN_RATE: u32 = 2;
    /// Spawn rate added per level
    pub const SPAWN_RATE_INCREASE: u32 = 5;
    /// Enemy chance as a fraction of the asteroid chance
    pub const ENEMY_SPAWN_FACTOR: f64 = 0.5;
    /// Power-up chance as a fraction of the asteroid chance
    pub const POWER_UP_SPAWN_FACTOR: f64 = 0.25;

    /// Leveling
    pub const START_LEVEL: u32 = 1;
    pub const SCORE_THRESHOLD: u32 = 100;

    /// Damage dealt on contact with the ship
    pub const ASTEROID_DAMAGE: i32 = 10;
    pub const ENEMY_DAMAGE: i32 = 20;

    /// Power-up effects
    pub const SHIELD_SCORE_BONUS: u32 = 50;
    pub const HEALTH_RESTORE: i32 = 20;

    /// Falling objects move down one row every this many ticks
    pub const DRIFT_INTERVAL: u64 = 10;

    /// Verbose achievement progress is narrated every this many ticks
    pub const PROGRESS_LOG_INTERVAL: u64 = 100;
}
