//! End-of-run statistics summary

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementEngine, Tier};
use crate::sim::GameState;
use crate::stats::StatsTracker;

/// One achievement line of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementSummary {
    pub name: String,
    pub description: String,
    pub percent: f64,
    pub tier: Tier,
}

/// Final statistics shown when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub score: u32,
    pub level: u32,
    pub ticks: u64,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// Every hit destroys exactly one enemy
    pub enemies_destroyed: u32,
    pub survival_seconds: u64,
    pub achievements: Vec<AchievementSummary>,
}

impl GameOverReport {
    pub fn new(state: &GameState, stats: &StatsTracker, achievements: &AchievementEngine) -> Self {
        Self {
            score: state.ship.score,
            level: state.progression.level,
            ticks: state.ticks,
            shots_fired: stats.shots_fired(),
            shots_hit: stats.shots_hit(),
            enemies_destroyed: stats.shots_hit(),
            survival_seconds: stats.elapsed_seconds(),
            achievements: achievements
                .list_all()
                .iter()
                .map(|a| AchievementSummary {
                    name: a.name().to_string(),
                    description: a.description().to_string(),
                    percent: a.progress() * 100.0,
                    tier: a.tier(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for GameOverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shots Fired: {}", self.shots_fired)?;
        writeln!(f, "Shots Hit: {}", self.shots_hit)?;
        writeln!(f, "Enemies Destroyed: {}", self.enemies_destroyed)?;
        writeln!(f, "Survival Time: {} seconds", self.survival_seconds)?;
        for a in &self.achievements {
            writeln!(
                f,
                "{} - {} ({:.0}% complete, Tier: {})",
                a.name, a.description, a.percent, a.tier
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryAchievementLog;

    #[test]
    fn test_report_text() {
        let mut stats = StatsTracker::new();
        stats.record_shot_fired();
        stats.record_shot_fired();
        stats.record_shot_hit();

        let mut engine = AchievementEngine::new(Box::new(MemoryAchievementLog::new()));
        engine.register("Intro", "Start game").unwrap();
        engine.set_progress("Intro", 0.5).unwrap();

        let report = GameOverReport::new(&GameState::default(), &stats, &engine);
        let text = report.to_string();

        assert!(text.starts_with("Shots Fired: 2\nShots Hit: 1\nEnemies Destroyed: 1\n"));
        assert!(text.contains("Intro - Start game (50% complete, Tier: Expert)"));
    }

    #[test]
    fn test_report_serializes() {
        let engine = AchievementEngine::with_standard(Box::new(MemoryAchievementLog::new()));
        let report = GameOverReport::new(&GameState::default(), &StatsTracker::new(), &engine);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["achievements"].as_array().unwrap().len(), 3);
        assert_eq!(json["achievements"][0]["tier"], "Novice");
    }
}
