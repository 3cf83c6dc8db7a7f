//! Achievement progress tracking
//!
//! Each achievement carries a progress value in [0, 1] and a tier derived
//! from it. The engine owns the registry and the set of achievements whose
//! mastery has already been written to the achievement log; that set lives
//! exactly as long as the engine.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::persistence::AchievementLog;
use crate::stats::StatsTracker;

/// Progress at or above this is Expert
pub const EXPERT_THRESHOLD: f64 = 0.5;
/// Progress at or above this is Master
pub const MASTER_THRESHOLD: f64 = 0.999;

/// Prefix of every line written to the achievement log
pub const MASTERED_PREFIX: &str = "Achievement Mastered: ";

pub const SURVIVOR: &str = "Survivor";
pub const ENEMY_EXTERMINATOR: &str = "Enemy Exterminator";
pub const SHARP_SHOOTER: &str = "Sharp Shooter";

/// Seconds survived for full Survivor progress
pub const SURVIVOR_TARGET_SECS: f64 = 120.0;
/// Enemies destroyed for full Enemy Exterminator progress
pub const EXTERMINATOR_TARGET_HITS: f64 = 20.0;
/// Accuracy needed for full Sharp Shooter progress
pub const SHARP_SHOOTER_TARGET_ACCURACY: f64 = 0.99;
/// Sharp Shooter stays at zero until more than this many shots were fired
pub const SHARP_SHOOTER_MIN_SHOTS: u32 = 10;

/// Coarse progress bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Novice,
    Expert,
    Master,
}

impl Tier {
    pub fn from_progress(progress: f64) -> Self {
        if progress >= MASTER_THRESHOLD {
            Tier::Master
        } else if progress >= EXPERT_THRESHOLD {
            Tier::Expert
        } else {
            Tier::Novice
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Novice => "Novice",
            Tier::Expert => "Expert",
            Tier::Master => "Master",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named progress tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    name: String,
    description: String,
    progress: f64,
}

impl Achievement {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            progress: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Always within [0, 1]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn tier(&self) -> Tier {
        Tier::from_progress(self.progress)
    }

    fn set_progress(&mut self, value: f64) {
        // NaN counts as no progress
        self.progress = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }
}

/// Registry of achievements plus one-time mastery logging.
pub struct AchievementEngine {
    /// Registration order
    records: Vec<Achievement>,
    index: HashMap<String, usize>,
    /// Names whose mastery line has been emitted
    logged: HashSet<String>,
    log: Box<dyn AchievementLog>,
}

impl fmt::Debug for AchievementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementEngine")
            .field("records", &self.records)
            .field("logged", &self.logged)
            .finish_non_exhaustive()
    }
}

impl AchievementEngine {
    /// Empty registry writing mastery lines to `log`
    pub fn new(log: Box<dyn AchievementLog>) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            logged: HashSet::new(),
            log,
        }
    }

    /// Registry preloaded with Survivor, Enemy Exterminator and Sharp Shooter
    pub fn with_standard(log: Box<dyn AchievementLog>) -> Self {
        let mut engine = Self::new(log);
        for (name, description) in [
            (SURVIVOR, "Survive for 2 minutes."),
            (ENEMY_EXTERMINATOR, "Destroy 20 enemies."),
            (SHARP_SHOOTER, "Achieve 99% shot accuracy."),
        ] {
            engine.insert(Achievement::new(name, description));
        }
        engine
    }

    pub fn register(&mut self, name: &str, description: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidArgument { field: "name" });
        }
        if description.is_empty() {
            return Err(ValidationError::InvalidArgument {
                field: "description",
            });
        }
        if self.index.contains_key(name) {
            return Err(ValidationError::DuplicateKey {
                name: name.to_string(),
            });
        }
        self.insert(Achievement::new(name, description));
        Ok(())
    }

    fn insert(&mut self, achievement: Achievement) {
        self.index
            .insert(achievement.name.clone(), self.records.len());
        self.records.push(achievement);
    }

    /// Set absolute progress, clamped to [0, 1]
    pub fn set_progress(&mut self, name: &str, value: f64) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidArgument { field: "name" });
        }
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ValidationError::NotFound {
                name: name.to_string(),
            })?;
        self.records[idx].set_progress(value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Achievement> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// All records in registration order
    pub fn list_all(&self) -> &[Achievement] {
        &self.records
    }

    /// Write one log line for each newly mastered achievement.
    ///
    /// Returns the names mastered by this call. A name is only ever returned
    /// once per engine, even if the log sink failed to store its line.
    pub fn refresh_mastered(&mut self) -> Vec<String> {
        let mut newly = Vec::new();
        for achievement in &self.records {
            if achievement.tier() != Tier::Master || self.logged.contains(&achievement.name) {
                continue;
            }
            let line = format!("{}{}", MASTERED_PREFIX, achievement.name);
            if let Err(e) = self.log.append(&line) {
                log::error!("Failed to record mastery of '{}': {}", achievement.name, e);
            }
            self.logged.insert(achievement.name.clone());
            newly.push(achievement.name.clone());
        }
        newly
    }

    pub fn is_mastery_logged(&self, name: &str) -> bool {
        self.logged.contains(name)
    }

    /// The sink mastery lines are written to
    pub fn achievement_log(&self) -> &dyn AchievementLog {
        self.log.as_ref()
    }
}

/// Progress values of the three standard achievements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardProgress {
    pub survivor: f64,
    pub exterminator: f64,
    pub sharp_shooter: f64,
}

impl StandardProgress {
    /// Derive progress from survival time and shot statistics
    pub fn compute(elapsed_secs: u64, stats: &StatsTracker) -> Self {
        let survivor = (elapsed_secs as f64 / SURVIVOR_TARGET_SECS).min(1.0);
        let exterminator = (f64::from(stats.shots_hit()) / EXTERMINATOR_TARGET_HITS).min(1.0);
        let sharp_shooter = if stats.shots_fired() > SHARP_SHOOTER_MIN_SHOTS {
            (stats.accuracy() / SHARP_SHOOTER_TARGET_ACCURACY).min(1.0)
        } else {
            0.0
        };
        Self {
            survivor,
            exterminator,
            sharp_shooter,
        }
    }

    /// (name, progress) pairs in standard order
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            (SURVIVOR, self.survivor),
            (ENEMY_EXTERMINATOR, self.exterminator),
            (SHARP_SHOOTER, self.sharp_shooter),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryAchievementLog;
    use std::io;

    fn engine() -> (AchievementEngine, MemoryAchievementLog) {
        let log = MemoryAchievementLog::new();
        (AchievementEngine::new(Box::new(log.clone())), log)
    }

    struct BrokenLog;

    impl AchievementLog for BrokenLog {
        fn append(&mut self, _line: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn read_all(&self) -> io::Result<Vec<String>> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_progress(0.0), Tier::Novice);
        assert_eq!(Tier::from_progress(0.4999), Tier::Novice);
        assert_eq!(Tier::from_progress(0.5), Tier::Expert);
        assert_eq!(Tier::from_progress(0.9989), Tier::Expert);
        assert_eq!(Tier::from_progress(0.999), Tier::Master);
        assert_eq!(Tier::from_progress(1.0), Tier::Master);
    }

    #[test]
    fn test_register_and_update() {
        let (mut engine, _) = engine();
        engine.register("Progress", "Try to win").unwrap();
        engine.set_progress("Progress", 0.4).unwrap();
        let a = engine.get("Progress").unwrap();
        assert!((a.progress() - 0.4).abs() < 1e-4);
        assert_eq!(a.description(), "Try to win");
        assert_eq!(a.tier(), Tier::Novice);
    }

    #[test]
    fn test_progress_is_clamped() {
        let (mut engine, _) = engine();
        engine.register("Clamp", "Stay in range").unwrap();

        engine.set_progress("Clamp", -0.5).unwrap();
        assert_eq!(engine.get("Clamp").unwrap().progress(), 0.0);

        engine.set_progress("Clamp", 7.0).unwrap();
        assert_eq!(engine.get("Clamp").unwrap().progress(), 1.0);

        engine.set_progress("Clamp", f64::NAN).unwrap();
        assert_eq!(engine.get("Clamp").unwrap().progress(), 0.0);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (mut engine, _) = engine();
        engine.register("Once", "Only once").unwrap();
        engine.set_progress("Once", 0.7).unwrap();

        let err = engine.register("Once", "Again").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateKey {
                name: "Once".to_string()
            }
        );
        // Registry untouched
        assert_eq!(engine.list_all().len(), 1);
        assert_eq!(engine.get("Once").unwrap().description(), "Only once");
        assert_eq!(engine.get("Once").unwrap().progress(), 0.7);
    }

    #[test]
    fn test_empty_identifiers_rejected() {
        let (mut engine, _) = engine();
        assert_eq!(
            engine.register("", "desc"),
            Err(ValidationError::InvalidArgument { field: "name" })
        );
        assert_eq!(
            engine.register("Name", ""),
            Err(ValidationError::InvalidArgument {
                field: "description"
            })
        );
        assert!(engine.list_all().is_empty());
    }

    #[test]
    fn test_unknown_name_update_fails() {
        let (mut engine, _) = engine();
        assert_eq!(
            engine.set_progress("Ghost", 0.5),
            Err(ValidationError::NotFound {
                name: "Ghost".to_string()
            })
        );
    }

    #[test]
    fn test_list_all_keeps_registration_order() {
        let (mut engine, _) = engine();
        engine.register("B", "second letter").unwrap();
        engine.register("A", "first letter").unwrap();
        let names: Vec<_> = engine.list_all().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_mastery_logged_exactly_once() {
        let (mut engine, log) = engine();
        engine.register("Intro", "Start game").unwrap();
        engine.register("Other", "Not yet").unwrap();

        assert!(engine.refresh_mastered().is_empty());

        engine.set_progress("Intro", 1.0).unwrap();
        assert_eq!(engine.refresh_mastered(), vec!["Intro".to_string()]);
        assert!(engine.refresh_mastered().is_empty());

        // Dropping below Master and climbing back does not log again
        engine.set_progress("Intro", 0.2).unwrap();
        engine.set_progress("Intro", 1.0).unwrap();
        assert!(engine.refresh_mastered().is_empty());

        assert_eq!(
            log.read_all().unwrap(),
            vec!["Achievement Mastered: Intro".to_string()]
        );
        assert!(engine.is_mastery_logged("Intro"));
        assert!(!engine.is_mastery_logged("Other"));
    }

    #[test]
    fn test_sink_failure_keeps_bookkeeping() {
        let mut engine = AchievementEngine::new(Box::new(BrokenLog));
        engine.register("Intro", "Start game").unwrap();
        engine.set_progress("Intro", 1.0).unwrap();

        assert_eq!(engine.refresh_mastered(), vec!["Intro".to_string()]);
        assert!(engine.is_mastery_logged("Intro"));
        // No retry
        assert!(engine.refresh_mastered().is_empty());
    }

    #[test]
    fn test_standard_engine_names() {
        let engine = AchievementEngine::with_standard(Box::new(MemoryAchievementLog::new()));
        let names: Vec<_> = engine.list_all().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec![SURVIVOR, ENEMY_EXTERMINATOR, SHARP_SHOOTER]);
    }

    #[test]
    fn test_sharp_shooter_gated_by_shot_floor() {
        let mut stats = StatsTracker::new();
        for _ in 0..10 {
            stats.record_shot_fired();
            stats.record_shot_hit();
        }
        // Perfect accuracy, but only 10 shots
        assert_eq!(StandardProgress::compute(0, &stats).sharp_shooter, 0.0);

        stats.record_shot_fired();
        stats.record_shot_hit();
        assert_eq!(StandardProgress::compute(0, &stats).sharp_shooter, 1.0);
    }

    #[test]
    fn test_standard_progress_scaling() {
        let mut stats = StatsTracker::new();
        for _ in 0..5 {
            stats.record_shot_fired();
            stats.record_shot_hit();
        }
        let p = StandardProgress::compute(60, &stats);
        assert_eq!(p.survivor, 0.5);
        assert_eq!(p.exterminator, 0.25);

        let p = StandardProgress::compute(600, &stats);
        assert_eq!(p.survivor, 1.0);
    }
}
