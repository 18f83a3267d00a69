//! Player craft model
//!
//! The craft flies "into" the screen (facing -Z) and slides laterally.
//! X/Y wrap to the opposite edge, Z is clamped.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::facing_from_yaw_pitch;
use crate::tuning::CraftTuning;

/// Lateral steering for one frame (held key states)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Steering {
    /// Unit-per-axis steering direction (not normalized; diagonals are faster)
    pub fn axis(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y += 1.0;
        }
        if self.down {
            dir.y -= 1.0;
        }
        dir
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCraft {
    pub position: Vec3,
    /// Heading angles (radians); facing is derived from these
    yaw: f32,
    pitch: f32,
    facing: Vec3,
    /// Last frame's lateral velocity (informational)
    pub velocity: Vec3,
    pub radius: f32,
}

impl Default for PlayerCraft {
    fn default() -> Self {
        Self::new(&CraftTuning::default())
    }
}

impl PlayerCraft {
    pub fn new(tuning: &CraftTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            facing: facing_from_yaw_pitch(0.0, 0.0),
            velocity: Vec3::ZERO,
            radius: tuning.collision_radius,
        }
    }

    /// Unit facing direction
    #[inline]
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn yaw_pitch(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// Set heading angles and recompute facing
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.facing = facing_from_yaw_pitch(yaw, pitch);
    }

    /// Apply lateral steering, then wrap X/Y and clamp Z
    pub fn update(&mut self, steering: Steering, dt: f32, tuning: &CraftTuning) {
        self.velocity = steering.axis() * tuning.lateral_speed;
        self.position += self.velocity * dt;

        let bounds = tuning.world_bounds;
        self.position.x = crate::wrap_axis(self.position.x, bounds);
        self.position.y = crate::wrap_axis(self.position.y, bounds);
        self.position.z = self
            .position
            .z
            .clamp(-tuning.forward_limit, tuning.forward_limit);

        self.facing = facing_from_yaw_pitch(self.yaw, self.pitch);
    }
}
