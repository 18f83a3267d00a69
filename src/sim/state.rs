//! Game state and core simulation types
//!
//! `Simulation` is the single owned context for one game instance: phase,
//! timers, lives, craft, camera and obstacle pool. Nothing is global, so any
//! number of instances can run side by side (tests do exactly that).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{CameraMode, CameraRig, ViewTransform};
use super::collision::{CollisionEvent, check_collisions};
use super::craft::PlayerCraft;
use super::difficulty::speed_multiplier;
use super::field::ObstacleField;
use super::tick::{FrameStats, InputLatch};
use crate::highscores::HighScores;
use crate::report::PostMortemReport;
use crate::snapshot::FrameSnapshot;
use crate::{SimError, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    MainMenu,
    /// Active flight
    Playing,
    /// Run ended; report pending or shown
    GameOver,
}

/// Notifications for the UI layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    CraftHit { obstacle_id: u32, lives_remaining: u8 },
    ObstaclesAvoided { count: u32, total: u32 },
    CameraModeChanged(CameraMode),
    ExitRequested,
    ReportReady(PostMortemReport),
}

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete simulation context for one game instance
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    pub(crate) tuning: Tuning,
    /// Gameplay RNG (spawn heuristics, recycling)
    pub(crate) rng: R,
    pub(crate) phase: GamePhase,
    /// Play time of the current session (seconds)
    pub(crate) elapsed: f32,
    pub(crate) lives: u8,
    pub(crate) obstacles_avoided: u32,
    pub(crate) hits_taken: u32,
    /// Play time of the last collision penalty
    pub(crate) last_collision_time: f32,
    /// Seconds spent in GameOver
    pub(crate) post_mortem_timer: f32,
    pub(crate) report_ready: bool,
    pub(crate) exit_requested: bool,
    pub(crate) craft: PlayerCraft,
    pub(crate) camera: CameraRig,
    pub(crate) field: ObstacleField,
    pub(crate) input: InputLatch,
    pub(crate) diagnostics: FrameStats,
    pub(crate) records: HighScores,
    pub(crate) report: Option<PostMortemReport>,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    /// Create a simulation with a seeded PCG generator
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        let sim = Self::build(Pcg32::seed_from_u64(seed), seed, tuning)?;
        log::info!("Simulation created with seed {seed}");
        Ok(sim)
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation around an injected gameplay RNG.
    ///
    /// The cosmetic tint stream is seeded from one draw of `rng`.
    pub fn with_rng(mut rng: R, tuning: Tuning) -> Result<Self, SimError> {
        let tint_seed = rng.next_u64();
        Self::build(rng, tint_seed, tuning)
    }

    fn build(rng: R, tint_seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        let craft = PlayerCraft::new(&tuning.craft);
        let lives = tuning.session.starting_lives;
        Ok(Self {
            tuning,
            rng,
            phase: GamePhase::MainMenu,
            elapsed: 0.0,
            lives,
            obstacles_avoided: 0,
            hits_taken: 0,
            last_collision_time: 0.0,
            post_mortem_timer: 0.0,
            report_ready: false,
            exit_requested: false,
            craft,
            camera: CameraRig::default(),
            field: ObstacleField::new(tint_seed),
            input: InputLatch::default(),
            diagnostics: FrameStats::default(),
            records: HighScores::new(),
            report: None,
            events: Vec::new(),
        })
    }

    /// Reset the session and enter Playing.
    ///
    /// Not guarded against being called mid-game; the caller decides when a
    /// restart is appropriate.
    pub fn start_new_game(&mut self) -> Result<(), SimError> {
        self.lives = self.tuning.session.starting_lives;
        self.elapsed = 0.0;
        self.obstacles_avoided = 0;
        self.hits_taken = 0;
        self.last_collision_time = 0.0;
        self.post_mortem_timer = 0.0;
        self.report_ready = false;
        self.report = None;

        self.craft = PlayerCraft::new(&self.tuning.craft);
        self.field
            .reset(self.craft.position, &mut self.rng, &self.tuning.field)?;
        self.camera.update(&self.craft)?;

        self.set_phase(GamePhase::Playing);
        log::info!(
            "New game started: {} lives, {} obstacles",
            self.lives,
            self.field.len()
        );
        Ok(())
    }

    /// Run the collision test and apply a hit if one is found.
    ///
    /// Not cooldown-gated; outside Playing this is a no-op.
    ///
    /// On a hit: one life is lost, the cooldown restarts at the current play
    /// time, the struck obstacle is recycled in place, and reaching zero
    /// lives ends the session on this same call.
    pub fn resolve_collision_check(&mut self) -> Result<Option<CollisionEvent>, SimError> {
        if self.phase != GamePhase::Playing {
            return Ok(None);
        }
        let Some(hit) = check_collisions(
            self.craft.position,
            self.craft.radius,
            self.field.obstacles(),
        ) else {
            return Ok(None);
        };

        self.lives = self.lives.saturating_sub(1);
        self.hits_taken += 1;
        self.last_collision_time = self.elapsed;
        self.field
            .recycle_to_far_position(hit.index, &mut self.rng, &self.tuning.field)?;

        log::debug!(
            "Craft hit by obstacle {} at t={:.2}s (overlap {:.2}), {} lives left",
            hit.obstacle_id,
            self.elapsed,
            hit.penetration(),
            self.lives
        );
        self.emit(GameEvent::CraftHit {
            obstacle_id: hit.obstacle_id,
            lives_remaining: self.lives,
        });

        if self.lives == 0 {
            self.enter_game_over();
        }
        Ok(Some(hit))
    }

    fn enter_game_over(&mut self) {
        self.post_mortem_timer = 0.0;
        self.report_ready = false;

        let rank = self
            .records
            .add_run(self.elapsed, self.obstacles_avoided);
        self.report = Some(PostMortemReport {
            survival_secs: self.elapsed,
            obstacles_avoided: self.obstacles_avoided,
            hits_taken: self.hits_taken,
            final_speed_multiplier: speed_multiplier(self.elapsed, &self.tuning.field),
            rank,
            best_survival_secs: self.records.best_survival(),
        });

        log::info!(
            "Game over after {:.1}s, {} obstacles avoided",
            self.elapsed,
            self.obstacles_avoided
        );
        self.set_phase(GamePhase::GameOver);
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            log::info!("Phase {from:?} -> {to:?}");
            self.phase = to;
            self.emit(GameEvent::PhaseChanged { from, to });
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Play time of the current (or last) session in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn obstacles_avoided(&self) -> u32 {
        self.obstacles_avoided
    }

    pub fn last_collision_time(&self) -> f32 {
        self.last_collision_time
    }

    pub fn craft(&self) -> &PlayerCraft {
        &self.craft
    }

    /// Mutable craft access for scripted setups (orientation, placement)
    pub fn craft_mut(&mut self) -> &mut PlayerCraft {
        &mut self.craft
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Mutable pool access for scripted setups
    pub fn field_mut(&mut self) -> &mut ObstacleField {
        &mut self.field
    }

    pub fn view(&self) -> &ViewTransform {
        &self.camera.view
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn records(&self) -> &HighScores {
        &self.records
    }

    /// Whether the post-mortem delay has passed
    pub fn report_ready(&self) -> bool {
        self.report_ready
    }

    /// The last run's report, once the post-mortem delay has passed
    pub fn report(&self) -> Option<&PostMortemReport> {
        self.report.as_ref().filter(|_| self.report_ready)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Queue an event for the UI, dropping the oldest once the queue is full
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events raised since the last drain.
    ///
    /// Hosts should drain once per frame; at most `MAX_PENDING_EVENTS` are
    /// kept and older ones are dropped first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned read-only copy of everything the render layer needs
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}
