//! Player statistics: shots fired, shots hit, survival time

use std::time::{Duration, Instant};

/// Counts shots and measures survival time since construction.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    started: Instant,
    shots_fired: u32,
    shots_hit: u32,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    /// Start tracking now
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Start tracking from an explicit instant (replays, tests)
    pub fn started_at(started: Instant) -> Self {
        Self {
            started,
            shots_fired: 0,
            shots_hit: 0,
        }
    }

    pub fn record_shot_fired(&mut self) {
        self.shots_fired = self.shots_fired.saturating_add(1);
    }

    pub fn record_shot_hit(&mut self) {
        self.shots_hit = self.shots_hit.saturating_add(1);
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    /// Hits per shot fired, 0.0 before the first shot
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        f64::from(self.shots_hit) / f64::from(self.shots_fired)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whole seconds survived so far
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
