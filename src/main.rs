//! Void Runner headless entry point
//!
//! Reads a command script from stdin, one line per tick. Every character on
//! a line is fed to the simulation as player input before the tick runs
//! (whitespace and '.' mean "no input"). Stops at end of input or game over
//! and prints the final report.
//!
//! Usage: `void-runner [settings.json] < script.txt`

use std::io::{self, BufRead};
use std::process::ExitCode;

use void_runner::narration::LogFacadeSink;
use void_runner::persistence::FileAchievementLog;
use void_runner::{SimSettings, Simulation};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Void Runner (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match SimSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimSettings::default(),
    };

    let achievement_log = FileAchievementLog::new(settings.achievement_log.clone());
    let mut sim = match Simulation::new(
        &settings,
        Box::new(LogFacadeSink),
        Box::new(achievement_log),
    ) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        for key in line.chars().filter(|c| !c.is_whitespace() && *c != '.') {
            if let Err(e) = sim.handle_input(&key.to_string()) {
                log::info!("Move rejected: {}", e);
            }
        }

        if sim.tick().game_over {
            break;
        }
    }

    let report = sim.report();
    print!("{}", report);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }

    ExitCode::SUCCESS
}
