//! Score-threshold leveling
//!
//! The next level is reached once the score is at least
//! `level * score_threshold`. Surplus score is not consumed, and at most one
//! level is gained per check, so a large score jump catches up one tick at
//! a time.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current level and the spawn rate that goes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    /// Percentage chance per tick of an asteroid spawn
    pub spawn_rate: u32,
    pub score_threshold: u32,
    pub spawn_rate_increase: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(START_SPAWN_RATE, SCORE_THRESHOLD, SPAWN_RATE_INCREASE)
    }
}

impl Progression {
    pub fn new(start_spawn_rate: u32, score_threshold: u32, spawn_rate_increase: u32) -> Self {
        Self {
            level: START_LEVEL,
            spawn_rate: start_spawn_rate,
            score_threshold,
            spawn_rate_increase,
        }
    }

    /// Score needed to leave the current level
    pub fn next_threshold(&self) -> u64 {
        u64::from(self.level) * u64::from(self.score_threshold)
    }

    /// Advance one level if `score` meets the threshold.
    ///
    /// Returns the new (level, spawn rate) when a level was gained.
    pub fn check_level_up(&mut self, score: u32) -> Option<(u32, u32)> {
        if u64::from(score) < self.next_threshold() {
            return None;
        }
        self.level += 1;
        self.spawn_rate = self.spawn_rate.saturating_add(self.spawn_rate_increase);
        Some((self.level, self.spawn_rate))
    }
}
