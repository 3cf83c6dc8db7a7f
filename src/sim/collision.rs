//! Collision resolution on the grid
//!
//! Two phases, both scanning the entity list in insertion order:
//! - Phase A: every non-projectile entity sharing the ship's cell is applied
//!   to the ship (power-up effect or damage) and marked for removal.
//! - Phase B: every projectile is matched against enemies; the first enemy
//!   on its cell is destroyed along with the projectile.
//!
//! Marked entities are removed once, after both phases.

use super::state::{Entity, EntityKind, GameEvent, Ship};
use crate::stats::StatsTracker;

/// Damage and power-up effect amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionRules {
    pub asteroid_damage: i32,
    pub enemy_damage: i32,
    pub shield_score_bonus: u32,
    pub health_restore: i32,
}

impl Default for CollisionRules {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            asteroid_damage: ASTEROID_DAMAGE,
            enemy_damage: ENEMY_DAMAGE,
            shield_score_bonus: SHIELD_SCORE_BONUS,
            health_restore: HEALTH_RESTORE,
        }
    }
}

/// Apply a power-up's effect to the ship
pub fn apply_power_up(kind: EntityKind, ship: &mut Ship, rules: &CollisionRules) {
    match kind {
        EntityKind::ShieldPowerUp => ship.add_score(rules.shield_score_bonus),
        EntityKind::HealthPowerUp => ship.heal(rules.health_restore),
        EntityKind::Asteroid | EntityKind::Enemy | EntityKind::Projectile => {}
    }
}

/// Resolve all collisions for this tick and remove consumed entities.
///
/// Each projectile destroys at most one enemy and records one hit.
pub fn resolve_collisions(
    ship: &mut Ship,
    entities: &mut Vec<Entity>,
    stats: &mut StatsTracker,
    rules: &CollisionRules,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut marked = vec![false; entities.len()];

    // Phase A: ship
    for (i, entity) in entities.iter().enumerate() {
        if entity.pos != ship.pos {
            continue;
        }
        let damage = match entity.kind {
            EntityKind::Projectile => continue,
            EntityKind::ShieldPowerUp | EntityKind::HealthPowerUp => {
                apply_power_up(entity.kind, ship, rules);
                events.push(GameEvent::Collected {
                    kind: entity.kind,
                    pos: entity.pos,
                });
                marked[i] = true;
                continue;
            }
            EntityKind::Asteroid => rules.asteroid_damage,
            EntityKind::Enemy => rules.enemy_damage,
        };
        ship.take_damage(damage);
        events.push(GameEvent::Hit {
            kind: entity.kind,
            damage,
            health: ship.health,
        });
        marked[i] = true;
    }

    // Phase B: projectiles against enemies
    for (pi, projectile) in entities.iter().enumerate() {
        if projectile.kind != EntityKind::Projectile {
            continue;
        }
        let target = entities
            .iter()
            .position(|e| e.kind == EntityKind::Enemy && e.pos == projectile.pos);
        if let Some(ei) = target {
            marked[pi] = true;
            marked[ei] = true;
            stats.record_shot_hit();
            events.push(GameEvent::EnemyDestroyed {
                pos: entities[ei].pos,
            });
        }
    }

    let mut idx = 0;
    entities.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });

    events
}
