//! Game state and core simulation types
//!
//! The ship is a singleton held apart from the entity collection; spawn and
//! collision code always address it directly.

use serde::{Deserialize, Serialize};

use super::progression::Progression;
use crate::consts::*;
use crate::error::BoundsError;

/// A grid cell. `y` grows downward; row 0 is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies inside a `width` x `height` grid
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as i64) < width as i64
            && (self.y as i64) < height as i64
    }
}

/// Ship movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset for one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Everything that shares the grid with the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Asteroid,
    Enemy,
    /// Fired by the ship, travels upward
    Projectile,
    /// Grants score
    ShieldPowerUp,
    /// Restores health
    HealthPowerUp,
}

impl EntityKind {
    pub fn is_power_up(&self) -> bool {
        matches!(self, EntityKind::ShieldPowerUp | EntityKind::HealthPowerUp)
    }

    /// One-character display glyph
    pub fn glyph(&self) -> char {
        match self {
            EntityKind::Asteroid => 'O',
            EntityKind::Enemy => 'V',
            EntityKind::Projectile => '|',
            EntityKind::ShieldPowerUp => 'S',
            EntityKind::HealthPowerUp => 'H',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Asteroid => "Asteroid",
            EntityKind::Enemy => "Enemy",
            EntityKind::Projectile => "Projectile",
            EntityKind::ShieldPowerUp => "ShieldPowerUp",
            EntityKind::HealthPowerUp => "HealthPowerUp",
        }
    }
}

/// A hazard, projectile or power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Position,
}

impl Entity {
    pub fn new(kind: EntityKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            pos: Position::new(x, y),
        }
    }

    /// Move one step for the given tick.
    ///
    /// Projectiles rise one row every tick; everything else falls one row on
    /// ticks that are a multiple of `drift_interval`.
    pub fn advance(&mut self, tick: u64, drift_interval: u64) {
        match self.kind {
            EntityKind::Projectile => self.pos.y -= 1,
            _ => {
                if drift_interval == 0 || tick % drift_interval == 0 {
                    self.pos.y += 1;
                }
            }
        }
    }

    /// Whether the entity has left the playable rows
    pub fn is_off_grid(&self, height: u32) -> bool {
        self.pos.y > height as i32 || (self.kind == EntityKind::Projectile && self.pos.y < 0)
    }
}

/// The player craft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Position,
    /// Never below zero
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(Position::new(SHIP_START_X, SHIP_START_Y), SHIP_MAX_HEALTH)
    }
}

impl Ship {
    pub fn new(pos: Position, max_health: i32) -> Self {
        Self {
            pos,
            health: max_health,
            max_health,
            score: 0,
        }
    }

    /// Step one cell. Fails without moving if the target is off the grid.
    pub fn move_by(
        &mut self,
        direction: Direction,
        width: u32,
        height: u32,
    ) -> Result<(), BoundsError> {
        let (dx, dy) = direction.delta();
        let target = Position::new(self.pos.x + dx, self.pos.y + dy);
        if !target.in_bounds(width, height) {
            return Err(BoundsError {
                x: target.x,
                y: target.y,
            });
        }
        self.pos = target;
        Ok(())
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

/// Input gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player input is applied
    Running,
    /// Only the pause toggle is accepted
    Paused,
}

/// Something observable that happened during a tick or input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { kind: EntityKind, pos: Position },
    /// Ship picked up a power-up
    Collected { kind: EntityKind, pos: Position },
    /// Ship ran into a hazard
    Hit {
        kind: EntityKind,
        damage: i32,
        health: i32,
    },
    /// A projectile destroyed an enemy
    EnemyDestroyed { pos: Position },
    LevelUp { level: u32, spawn_rate: u32 },
    Mastered { name: String },
    GameOver,
}

/// Complete mutable simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub width: u32,
    pub height: u32,
    pub ship: Ship,
    /// Insertion order is preserved; collision scans depend on it
    pub entities: Vec<Entity>,
    pub progression: Progression,
    pub phase: GamePhase,
    /// Ticks completed so far
    pub ticks: u64,
}

impl GameState {
    pub fn new(width: u32, height: u32, ship: Ship, progression: Progression) -> Self {
        Self {
            width,
            height,
            ship,
            entities: Vec::new(),
            progression,
            phase: GamePhase::Running,
            ticks: 0,
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Advance every entity and drop the ones that left the grid
    pub fn advance_entities(&mut self, drift_interval: u64) {
        let tick = self.ticks;
        let height = self.height;
        for entity in &mut self.entities {
            entity.advance(tick, drift_interval);
        }
        self.entities.retain(|e| !e.is_off_grid(height));
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT, Ship::default(), Progression::default())
    }
}
