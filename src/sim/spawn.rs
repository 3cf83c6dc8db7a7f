//! Per-tick spawning
//!
//! Draw protocol, in this exact order:
//! 1. `next_below(100)`; asteroid iff draw < spawn rate
//! 2. asteroid only: `next_below(width)` for the lane
//! 3. `next_below(100)`; enemy iff draw < spawn rate * enemy factor
//! 4. enemy only: `next_below(width)` for the lane
//! 5. `next_below(100)`; power-up iff draw < spawn rate * power-up factor
//! 6. power-up only: `next_below(width)` for the lane
//! 7. power-up only: `next_bool()`; true is a shield, false is health
//!
//! Conditional draws are taken only on their branch. A spawn whose cell is
//! the ship's cell is discarded after its draws, so discarding never shifts
//! the random sequence.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, EntityKind, Position};
use crate::consts::{ENEMY_SPAWN_FACTOR, POWER_UP_SPAWN_FACTOR};

/// Swappable source of spawn randomness
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Fair coin flip
    fn next_bool(&mut self) -> bool;
}

impl RandomSource for Pcg32 {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Spawn chances derived from the asteroid spawn rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRates {
    pub enemy_factor: f64,
    pub power_up_factor: f64,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            enemy_factor: ENEMY_SPAWN_FACTOR,
            power_up_factor: POWER_UP_SPAWN_FACTOR,
        }
    }
}

/// Run one spawn round at the top row of a `width`-wide grid.
///
/// Returns the entities to add, in asteroid, enemy, power-up order.
pub fn spawn_objects(
    rng: &mut dyn RandomSource,
    spawn_rate: u32,
    rates: SpawnRates,
    width: u32,
    ship: Position,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(3);
    let rate = f64::from(spawn_rate);

    let place = |kind: EntityKind, x: u32, spawned: &mut Vec<Entity>| {
        let entity = Entity::new(kind, x as i32, 0);
        if entity.pos != ship {
            spawned.push(entity);
        }
    };

    if rng.next_below(100) < spawn_rate {
        let x = rng.next_below(width);
        place(EntityKind::Asteroid, x, &mut spawned);
    }

    if f64::from(rng.next_below(100)) < rate * rates.enemy_factor {
        let x = rng.next_below(width);
        place(EntityKind::Enemy, x, &mut spawned);
    }

    if f64::from(rng.next_below(100)) < rate * rates.power_up_factor {
        let x = rng.next_below(width);
        let kind = if rng.next_bool() {
            EntityKind::ShieldPowerUp
        } else {
            EntityKind::HealthPowerUp
        };
        place(kind, x, &mut spawned);
    }

    spawned
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// A draw taken from a [`ScriptedRng`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Draw {
        Int(u32),
        Bool,
    }

    /// Replays scripted values and records every call
    #[derive(Debug, Default)]
    pub struct ScriptedRng {
        ints: VecDeque<u32>,
        bools: VecDeque<bool>,
        pub calls: Vec<Draw>,
    }

    impl ScriptedRng {
        pub fn new(ints: &[u32], bools: &[bool]) -> Self {
            Self {
                ints: ints.iter().copied().collect(),
                bools: bools.iter().copied().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_below(&mut self, bound: u32) -> u32 {
            self.calls.push(Draw::Int(bound));
            // Out of script: never spawn
            self.ints.pop_front().unwrap_or(99).min(bound - 1)
        }

        fn next_bool(&mut self) -> bool {
            self.calls.push(Draw::Bool);
            self.bools.pop_front().unwrap_or(false)
        }
    }

    const SHIP: Position = Position::new(5, 10);

    #[test]
    fn test_nothing_spawns_three_draws() {
        let mut rng = ScriptedRng::new(&[50, 50, 50], &[]);
        let spawned = spawn_objects(&mut rng, 2, SpawnRates::default(), 10, SHIP);
        assert!(spawned.is_empty());
        assert_eq!(rng.calls, vec![Draw::Int(100); 3]);
    }

    #[test]
    fn test_everything_spawns_seven_draws() {
        let mut rng = ScriptedRng::new(&[0, 3, 0, 4, 0, 7], &[true]);
        let spawned = spawn_objects(&mut rng, 40, SpawnRates::default(), 10, SHIP);
        assert_eq!(
            spawned,
            vec![
                Entity::new(EntityKind::Asteroid, 3, 0),
                Entity::new(EntityKind::Enemy, 4, 0),
                Entity::new(EntityKind::ShieldPowerUp, 7, 0),
            ]
        );
        assert_eq!(
            rng.calls,
            vec![
                Draw::Int(100),
                Draw::Int(10),
                Draw::Int(100),
                Draw::Int(10),
                Draw::Int(100),
                Draw::Int(10),
                Draw::Bool,
            ]
        );
    }

    #[test]
    fn test_conditional_draws_only_on_branch() {
        // Asteroid misses, enemy hits, power-up misses
        let mut rng = ScriptedRng::new(&[90, 1, 2, 90], &[]);
        let spawned = spawn_objects(&mut rng, 20, SpawnRates::default(), 10, SHIP);
        assert_eq!(spawned, vec![Entity::new(EntityKind::Enemy, 2, 0)]);
        assert_eq!(
            rng.calls,
            vec![Draw::Int(100), Draw::Int(100), Draw::Int(10), Draw::Int(100)]
        );
    }

    #[test]
    fn test_fractional_thresholds() {
        // Rate 7: enemy below 3.5, power-up below 1.75
        let mut rng = ScriptedRng::new(&[99, 3, 0, 1, 9], &[false]);
        let spawned = spawn_objects(&mut rng, 7, SpawnRates::default(), 10, SHIP);
        assert_eq!(
            spawned,
            vec![
                Entity::new(EntityKind::Enemy, 0, 0),
                Entity::new(EntityKind::HealthPowerUp, 9, 0),
            ]
        );

        let mut rng = ScriptedRng::new(&[99, 4, 2], &[]);
        assert!(spawn_objects(&mut rng, 7, SpawnRates::default(), 10, SHIP).is_empty());
        assert_eq!(rng.calls.len(), 3);
    }

    #[test]
    fn test_spawn_on_ship_discarded_without_skipping_draws() {
        let ship = Position::new(4, 0);
        let mut rng = ScriptedRng::new(&[0, 4, 0, 4, 0, 4], &[true]);
        let spawned = spawn_objects(&mut rng, 40, SpawnRates::default(), 10, ship);
        assert!(spawned.is_empty());
        assert_eq!(rng.calls.len(), 7);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(
                spawn_objects(&mut a, 60, SpawnRates::default(), 10, SHIP),
                spawn_objects(&mut b, 60, SpawnRates::default(), 10, SHIP)
            );
        }
    }
}
