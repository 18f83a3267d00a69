//! Per-frame simulation tick
//!
//! Driven by the external frame clock with a variable `dt`. Within Playing
//! the order is fixed: craft, obstacle field, camera, collision check, so
//! collisions always see this frame's post-move positions.

use rand::Rng;

use super::collision::cooldown_elapsed;
use super::craft::Steering;
use super::state::{GameEvent, GamePhase, Simulation};
use crate::SimError;

/// Held key states for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Switch between chase and cockpit camera (acts on press)
    pub toggle_camera: bool,
    /// Quit request (acts on press)
    pub exit: bool,
    /// Start / restart request (acts on press)
    pub start: bool,
}

impl TickInput {
    pub fn steering(&self) -> Steering {
        Steering {
            left: self.move_left,
            right: self.move_right,
            up: self.move_up,
            down: self.move_down,
        }
    }
}

/// Buttons that went from released to held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presses {
    pub toggle_camera: bool,
    pub exit: bool,
    pub start: bool,
}

/// Press-edge detector for the one-shot buttons
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    toggle_camera: bool,
    exit: bool,
    start: bool,
}

impl InputLatch {
    pub fn update(&mut self, input: &TickInput) -> Presses {
        let presses = Presses {
            toggle_camera: input.toggle_camera && !self.toggle_camera,
            exit: input.exit && !self.exit,
            start: input.start && !self.start,
        };
        self.toggle_camera = input.toggle_camera;
        self.exit = input.exit;
        self.start = input.start;
        presses
    }
}

/// Rolling frame-rate bookkeeping, logged at debug level
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    time: f32,
    frames: u32,
}

impl FrameStats {
    fn record(&mut self, dt: f32, pool_size: usize, interval: f32) {
        self.time += dt;
        self.frames += 1;
        if self.time > interval {
            let fps = self.frames as f32 / self.time;
            log::debug!("{fps:.1} fps average, {pool_size} obstacles live");
            *self = Self::default();
        }
    }
}

/// Advance the simulation by one frame of `dt` seconds
pub fn tick<R: Rng>(sim: &mut Simulation<R>, input: &TickInput, dt: f32) -> Result<(), SimError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidDelta(dt));
    }

    let presses = sim.input.update(input);
    sim.diagnostics
        .record(dt, sim.field.len(), sim.tuning.session.diagnostics_interval);

    if presses.exit && !sim.exit_requested {
        log::info!("Exit requested");
        sim.exit_requested = true;
        sim.emit(GameEvent::ExitRequested);
    }

    // Start/restart; the report delay is advisory, not enforced here
    if presses.start && matches!(sim.phase, GamePhase::MainMenu | GamePhase::GameOver) {
        sim.start_new_game()?;
        return Ok(());
    }

    match sim.phase {
        GamePhase::MainMenu => {}

        GamePhase::Playing => {
            if presses.toggle_camera {
                let mode = sim.camera.toggle_mode();
                log::debug!("Camera mode: {mode:?}");
                sim.emit(GameEvent::CameraModeChanged(mode));
            }

            sim.elapsed += dt;

            sim.craft.update(input.steering(), dt, &sim.tuning.craft);

            let report = sim.field.update(
                dt,
                sim.elapsed,
                sim.craft.position,
                &mut sim.rng,
                &sim.tuning.field,
            )?;
            if report.avoided > 0 {
                sim.obstacles_avoided += report.avoided;
                sim.emit(GameEvent::ObstaclesAvoided {
                    count: report.avoided,
                    total: sim.obstacles_avoided,
                });
            }

            sim.camera.update(&sim.craft)?;

            // Hits move to GameOver inside the check, on this same tick
            if cooldown_elapsed(
                sim.elapsed,
                sim.last_collision_time,
                sim.tuning.session.collision_cooldown,
            ) {
                sim.resolve_collision_check()?;
            }
        }

        GamePhase::GameOver => {
            sim.post_mortem_timer += dt;
            if !sim.report_ready && sim.post_mortem_timer > sim.tuning.session.report_delay {
                sim.report_ready = true;
                if let Some(report) = sim.report.clone() {
                    log::info!("Report ready: {report}");
                    sim.emit(GameEvent::ReportReady(report));
                }
            }
        }
    }

    Ok(())
}
