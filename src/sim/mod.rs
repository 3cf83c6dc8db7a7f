//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Integer grid movement only
//! - Spawn randomness only through an injected [`RandomSource`]
//! - Entity collection kept in insertion order
//! - No rendering, input device or file dependencies

pub mod collision;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionRules, resolve_collisions};
pub use progression::Progression;
pub use spawn::{RandomSource, SpawnRates, spawn_objects};
pub use state::{Direction, Entity, EntityKind, GameEvent, GamePhase, GameState, Position, Ship};
pub use tick::{
    AchievementProgress, Command, InputOutcome, RenderKind, Renderable, Simulation, TickReport,
};
