//! Asteroid Dodge headless runner
//!
//! Plays one scripted session without a window: presses start, weaves the
//! craft on a fixed pattern at 60 Hz until the post-mortem report is ready,
//! then prints the report as JSON.
//!
//! Usage: `asteroid-dodge [seed] [tuning.json]`

use std::process::ExitCode;

use asteroid_dodge::sim::{GameEvent, GamePhase, Simulation, TickInput, tick};
use asteroid_dodge::{SimError, Tuning};

/// Frame delta the runner feeds the simulation
const FRAME_DT: f32 = 1.0 / 60.0;
/// Stop even if the craft never dies
const MAX_PLAY_SECS: f32 = 600.0;

/// Scripted weave: a slow figure-eight over the lateral axes
fn scripted_input(frame: u64) -> TickInput {
    let t = frame as f32 * FRAME_DT;
    let sx = (t * 0.9).sin();
    let sy = (t * 1.7).sin();
    TickInput {
        move_left: sx < -0.3,
        move_right: sx > 0.3,
        move_up: sy > 0.3,
        move_down: sy < -0.3,
        // Flip to cockpit view briefly every 20s
        toggle_camera: frame % 1200 == 600 || frame % 1200 == 900,
        ..Default::default()
    }
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(Tuning::from_json(&json)?)
        }
        None => Ok(Tuning::default()),
    }
}

fn run(seed: u64, tuning: Tuning) -> Result<Simulation, SimError> {
    let mut sim = Simulation::new(seed, tuning)?;
    tick(
        &mut sim,
        &TickInput {
            start: true,
            ..Default::default()
        },
        FRAME_DT,
    )?;

    let mut frame: u64 = 0;
    loop {
        tick(&mut sim, &scripted_input(frame), FRAME_DT)?;
        frame += 1;

        for event in sim.drain_events() {
            match event {
                GameEvent::CraftHit { lives_remaining, .. } => {
                    log::info!("Hit! {lives_remaining} lives left at {:.1}s", sim.elapsed());
                }
                GameEvent::ReportReady(report) => {
                    log::info!("{report}");
                    return Ok(sim);
                }
                _ => {}
            }
        }

        if sim.phase() == GamePhase::Playing && sim.elapsed() > MAX_PLAY_SECS {
            log::warn!("Craft survived {MAX_PLAY_SECS}s, stopping run");
            return Ok(sim);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroid Dodge (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    let tuning = match load_tuning(args.get(2).map(String::as_str)) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Could not load tuning: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sim = match run(seed, tuning) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = match sim.report() {
        Some(report) => serde_json::to_string_pretty(report),
        None => serde_json::to_string_pretty(&sim.snapshot()),
    };
    match summary {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not serialize summary: {e}");
            ExitCode::FAILURE
        }
    }
}
