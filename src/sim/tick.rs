//! Tick driver
//!
//! [`Simulation`] owns the game state and sequences every tick:
//! advance entities, resolve collisions, spawn, level up, refresh
//! achievements, then check for game over. Player input goes through
//! [`Simulation::handle_input`] and is gated by the pause state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionRules, resolve_collisions};
use super::spawn::{RandomSource, SpawnRates, spawn_objects};
use super::state::{
    Direction, Entity, EntityKind, GameEvent, GamePhase, GameState, Position, Ship,
};
use crate::achievements::{AchievementEngine, StandardProgress};
use crate::consts::PROGRESS_LOG_INTERVAL;
use crate::error::{BoundsError, ConfigError};
use crate::narration::LogSink;
use crate::persistence::AchievementLog;
use crate::report::GameOverReport;
use crate::settings::SimSettings;
use crate::stats::StatsTracker;

/// Narrated when input is not part of the command vocabulary
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Use W, A, S, D, F, or P.";

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Fire,
    TogglePause,
}

impl Command {
    /// Parse a single-character command (case-insensitive)
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match key.to_ascii_uppercase() {
            'W' => Some(Command::Move(Direction::Up)),
            'A' => Some(Command::Move(Direction::Left)),
            'S' => Some(Command::Move(Direction::Down)),
            'D' => Some(Command::Move(Direction::Right)),
            'F' => Some(Command::Fire),
            'P' => Some(Command::TogglePause),
            _ => None,
        }
    }
}

/// What became of a piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    /// Dropped because the game is paused
    Suppressed,
    /// Not a command; narrated and otherwise ignored
    Invalid,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based index of the tick just run
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub game_over: bool,
}

/// What a renderable is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderKind {
    Ship,
    Entity(EntityKind),
}

/// One drawable grid occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderable {
    pub kind: RenderKind,
    pub pos: Position,
    pub glyph: char,
}

/// Achievement progress for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub name: String,
    /// 0 - 100
    pub percent: f64,
}

/// The simulation driver
pub struct Simulation {
    state: GameState,
    stats: StatsTracker,
    achievements: AchievementEngine,
    rng: Box<dyn RandomSource>,
    narration: Box<dyn LogSink>,
    verbose: bool,
    spawn_rates: SpawnRates,
    rules: CollisionRules,
    drift_interval: u64,
    progress: Vec<AchievementProgress>,
    game_over_announced: bool,
}

impl Simulation {
    /// Create a simulation from validated settings.
    ///
    /// Spawning uses a `Pcg32` seeded from `settings.seed`; the standard
    /// achievements are registered against `achievement_log`.
    pub fn new(
        settings: &SimSettings,
        narration: Box<dyn LogSink>,
        achievement_log: Box<dyn AchievementLog>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let state = GameState::new(
            settings.width,
            settings.height,
            settings.ship(),
            settings.progression(),
        );
        log::info!(
            "Simulation created: {}x{} grid, seed {}",
            settings.width,
            settings.height,
            settings.seed
        );
        Ok(Self {
            state,
            stats: StatsTracker::new(),
            achievements: AchievementEngine::with_standard(achievement_log),
            rng: Box::new(Pcg32::seed_from_u64(settings.seed)),
            narration,
            verbose: settings.verbose,
            spawn_rates: settings.spawn_rates(),
            rules: settings.collision_rules(),
            drift_interval: settings.drift_interval,
            progress: Vec::new(),
            game_over_announced: false,
        })
    }

    /// Replace the spawn random source
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the statistics tracker (e.g. one started earlier)
    pub fn with_stats(mut self, stats: StatsTracker) -> Self {
        self.stats = stats;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    // === Tick pipeline ===

    /// Run one tick. Always returns, game over or not.
    pub fn tick(&mut self) -> TickReport {
        self.state.ticks += 1;
        let mut events = Vec::new();

        self.state.advance_entities(self.drift_interval);

        let collisions = resolve_collisions(
            &mut self.state.ship,
            &mut self.state.entities,
            &mut self.stats,
            &self.rules,
        );
        for event in &collisions {
            self.narrate_collision(event);
        }
        events.extend(collisions);

        let spawned = spawn_objects(
            self.rng.as_mut(),
            self.state.progression.spawn_rate,
            self.spawn_rates,
            self.state.width,
            self.state.ship.pos,
        );
        for entity in spawned {
            self.narrate(&format!(
                "{} spawned at ({}, {})",
                entity.kind.as_str(),
                entity.pos.x,
                entity.pos.y
            ));
            events.push(GameEvent::Spawned {
                kind: entity.kind,
                pos: entity.pos,
            });
            self.state.add_entity(entity);
        }

        if let Some((level, spawn_rate)) =
            self.state.progression.check_level_up(self.state.ship.score)
        {
            self.narrate(&format!(
                "Level Up! Welcome to Level {}. Spawn rate increased to {}%.",
                level, spawn_rate
            ));
            events.push(GameEvent::LevelUp { level, spawn_rate });
        }

        events.extend(self.refresh_achievements());

        let game_over = self.is_game_over();
        if game_over && !self.game_over_announced {
            self.game_over_announced = true;
            self.state.phase = GamePhase::Paused;
            self.announce("Game over.");
            log::info!(
                "Game over after {} ticks (score {}, level {})",
                self.state.ticks,
                self.state.ship.score,
                self.state.progression.level
            );
            events.push(GameEvent::GameOver);
        }

        log::debug!(
            "tick {}: {} entities, health {}, {} events",
            self.state.ticks,
            self.state.entities.len(),
            self.state.ship.health,
            events.len()
        );

        TickReport {
            tick: self.state.ticks,
            events,
            game_over,
        }
    }

    /// Push the standard progress values, cache display percentages and
    /// log newly mastered achievements.
    fn refresh_achievements(&mut self) -> Vec<GameEvent> {
        let progress = StandardProgress::compute(self.stats.elapsed_seconds(), &self.stats);
        for (name, value) in progress.entries() {
            if let Err(e) = self.achievements.set_progress(name, value) {
                log::warn!("Skipping achievement update: {}", e);
            }
        }

        self.progress = self
            .achievements
            .list_all()
            .iter()
            .map(|a| AchievementProgress {
                name: a.name().to_string(),
                percent: a.progress() * 100.0,
            })
            .collect();

        if self.state.ticks % PROGRESS_LOG_INTERVAL == 0 {
            for (name, value) in progress.entries() {
                self.narrate(&format!("{} progress: {}%", name, (value * 100.0) as u32));
            }
        }

        self.achievements
            .refresh_mastered()
            .into_iter()
            .map(|name| {
                self.announce(&format!("Achievement Mastered: {}", name));
                GameEvent::Mastered { name }
            })
            .collect()
    }

    // === Input ===

    /// Handle one line of raw input from the command surface
    pub fn handle_input(&mut self, input: &str) -> Result<InputOutcome, BoundsError> {
        match Command::parse(input) {
            Some(command) => self.apply(command),
            None if self.is_paused() => Ok(InputOutcome::Suppressed),
            None => {
                self.announce(INVALID_INPUT_MESSAGE);
                Ok(InputOutcome::Invalid)
            }
        }
    }

    /// Apply a parsed command. While paused only the toggle gets through.
    pub fn apply(&mut self, command: Command) -> Result<InputOutcome, BoundsError> {
        if command == Command::TogglePause {
            self.toggle_pause();
            return Ok(InputOutcome::Applied);
        }
        if self.is_paused() {
            return Ok(InputOutcome::Suppressed);
        }
        match command {
            Command::Move(direction) => {
                self.state
                    .ship
                    .move_by(direction, self.state.width, self.state.height)?;
                let Position { x, y } = self.state.ship.pos;
                self.narrate(&format!("Ship moved to ({}, {})", x, y));
            }
            Command::Fire => self.fire(),
            Command::TogglePause => {}
        }
        Ok(InputOutcome::Applied)
    }

    fn fire(&mut self) {
        let pos = self.state.ship.pos;
        self.state
            .add_entity(Entity::new(EntityKind::Projectile, pos.x, pos.y));
        self.stats.record_shot_fired();
        self.narrate("Bullet fired!");
    }

    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
        };
        let line = if self.is_paused() {
            "Game paused."
        } else {
            "Game unpaused."
        };
        self.announce(line);
    }

    // === Narration ===

    /// Verbose-only narration
    fn narrate(&mut self, line: &str) {
        if self.verbose {
            self.narration.log(line);
        }
    }

    /// Narration that is always emitted
    fn announce(&mut self, line: &str) {
        self.narration.log(line);
    }

    fn narrate_collision(&mut self, event: &GameEvent) {
        let line = match event {
            GameEvent::Collected { kind, .. } => format!("Power-up collected: {}", kind.glyph()),
            GameEvent::Hit {
                kind: EntityKind::Asteroid,
                damage,
                ..
            } => format!("Hit by asteroid! Health reduced by {}.", damage),
            GameEvent::Hit { damage, .. } => format!("Hit by enemy! Health reduced by {}.", damage),
            GameEvent::EnemyDestroyed { pos } => {
                format!("Enemy destroyed at ({}, {})", pos.x, pos.y)
            }
            _ => return,
        };
        self.narrate(&line);
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for harnesses and scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn ship(&self) -> &Ship {
        &self.state.ship
    }

    pub fn entities(&self) -> &[Entity] {
        &self.state.entities
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.state.add_entity(entity);
    }

    pub fn level(&self) -> u32 {
        self.state.progression.level
    }

    pub fn spawn_rate(&self) -> u32 {
        self.state.progression.spawn_rate
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn achievements(&self) -> &AchievementEngine {
        &self.achievements
    }

    /// For registering extra achievements alongside the standard ones
    pub fn achievements_mut(&mut self) -> &mut AchievementEngine {
        &mut self.achievements
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state.ship.is_destroyed()
    }

    // === Display surface ===

    /// Everything to draw: entities in collection order, then the ship
    pub fn renderables(&self) -> Vec<Renderable> {
        self.state
            .entities
            .iter()
            .map(|e| Renderable {
                kind: RenderKind::Entity(e.kind),
                pos: e.pos,
                glyph: e.kind.glyph(),
            })
            .chain(std::iter::once(Renderable {
                kind: RenderKind::Ship,
                pos: self.state.ship.pos,
                glyph: 'A',
            }))
            .collect()
    }

    /// Labelled HUD values
    pub fn hud_stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Score", self.state.ship.score.to_string()),
            ("Health", self.state.ship.health.to_string()),
            ("Level", self.state.progression.level.to_string()),
            (
                "Time Survived",
                format!("{} seconds", self.stats.elapsed_seconds()),
            ),
        ]
    }

    /// Progress percentages as of the last tick
    pub fn achievement_progress(&self) -> &[AchievementProgress] {
        &self.progress
    }

    /// End-of-run statistics
    pub fn report(&self) -> GameOverReport {
        GameOverReport::new(&self.state, &self.stats, &self.achievements)
    }
}
