//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Caller-supplied frame delta only
//! - Injected, seedable RNG only
//! - One owned `Simulation` per game, no globals

pub mod camera;
pub mod collision;
pub mod craft;
pub mod difficulty;
pub mod field;
pub mod state;
pub mod tick;

pub use camera::{CameraMode, CameraRig, ViewTransform};
pub use collision::{CollisionEvent, check_collisions, cooldown_elapsed};
pub use craft::{PlayerCraft, Steering};
pub use difficulty::{Difficulty, population_cap, speed_multiplier};
pub use field::{FieldReport, OBSTACLE_PALETTE, Obstacle, ObstacleField, SpawnStrategy};
pub use state::{GameEvent, GamePhase, Simulation};
pub use tick::{InputLatch, Presses, TickInput, tick};
