//! Asteroid Dodge - An arcade asteroid-field survival game
//!
//! Core modules:
//! - `sim`: Simulation (craft, obstacle field, collisions, camera, phases)
//! - `snapshot`: Read-only per-frame data handed to the render layer
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory session leaderboard
//! - `report`: Post-mortem run summary

pub mod error;
pub mod highscores;
pub mod report;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::SimError;
pub use highscores::HighScores;
pub use report::PostMortemReport;
pub use snapshot::{FrameSnapshot, ObstacleInstance};
pub use tuning::Tuning;

use glam::Vec3;

/// Fixed world geometry that is not part of game balance
pub mod consts {
    use glam::Vec3;

    /// World up axis (camera reference)
    pub const WORLD_UP: Vec3 = Vec3::Y;
    /// Secondary camera reference axis, used when facing is near-vertical
    pub const WORLD_FORWARD_REF: Vec3 = Vec3::Z;
    /// Below this |forward x up|² the up axis is considered parallel
    pub const PARALLEL_EPSILON: f32 = 1e-6;

    /// Cockpit camera offset from the craft (world space)
    pub const COCKPIT_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 3.0);
    /// Chase camera distance behind the craft along its facing
    pub const CHASE_DISTANCE: f32 = 25.0;
    /// Chase camera lift above the craft
    pub const CHASE_HEIGHT: f32 = 8.0;
    /// Camera pose shown before the first game (menu backdrop)
    pub const MENU_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

    /// Draw culling: obstacles farther than this from the camera are skipped
    pub const DRAW_DISTANCE: f32 = 1000.0;
    /// Draw culling: obstacles this far past the camera on Z are skipped
    pub const DRAW_BEHIND_MARGIN: f32 = 50.0;

    /// Intercepting spawn: distance from the craft in the XY plane
    pub const INTERCEPT_DISTANCE_MIN: f32 = 800.0;
    pub const INTERCEPT_DISTANCE_MAX: f32 = 2000.0;
    /// Intercepting spawn: depth behind the craft on the forward axis
    pub const INTERCEPT_DEPTH_MIN: f32 = 300.0;
    pub const INTERCEPT_DEPTH_MAX: f32 = 700.0;
    /// Intercepting spawn: lateral jitter (±) and forward bias (0..) on direction
    pub const INTERCEPT_JITTER: f32 = 0.2;
    pub const INTERCEPT_FORWARD_BIAS: f32 = 0.2;
    /// Intercepting spawn: base speed range before difficulty
    pub const INTERCEPT_SPEED_MIN: f32 = 120.0;
    pub const INTERCEPT_SPEED_MAX: f32 = 300.0;

    /// Random spawn box
    pub const RANDOM_SPAWN_X: f32 = 1000.0;
    pub const RANDOM_SPAWN_Y: f32 = 800.0;
    pub const RANDOM_SPAWN_Z_NEAR: f32 = -200.0;
    pub const RANDOM_SPAWN_Z_FAR: f32 = -1000.0;
    /// Random spawn target near the origin
    pub const RANDOM_TARGET_XY: f32 = 75.0;
    pub const RANDOM_TARGET_Z_MIN: f32 = 250.0;
    pub const RANDOM_TARGET_Z_MAX: f32 = 400.0;
    /// Random spawn base speed range before difficulty
    pub const RANDOM_SPEED_MIN: f32 = 100.0;
    pub const RANDOM_SPEED_MAX: f32 = 250.0;

    /// Fresh spawn scale range; radius = scale * SPAWN_RADIUS_FACTOR
    pub const SPAWN_SCALE_MIN: f32 = 6.0;
    pub const SPAWN_SCALE_MAX: f32 = 10.0;
    pub const SPAWN_RADIUS_FACTOR: f32 = 1.6;

    /// Recycle (after impact) box
    pub const RECYCLE_X: f32 = 400.0;
    pub const RECYCLE_Y: f32 = 300.0;
    pub const RECYCLE_Z_NEAR: f32 = -600.0;
    pub const RECYCLE_Z_FAR: f32 = -1000.0;
    /// Recycle target near the origin
    pub const RECYCLE_TARGET_XY: f32 = 30.0;
    pub const RECYCLE_TARGET_Z: f32 = 200.0;
    /// Recycle speed and scale ranges; radius = scale * RECYCLE_RADIUS_FACTOR
    pub const RECYCLE_SPEED_MIN: f32 = 80.0;
    pub const RECYCLE_SPEED_MAX: f32 = 200.0;
    pub const RECYCLE_SCALE_MIN: f32 = 3.0;
    pub const RECYCLE_SCALE_MAX: f32 = 5.0;
    pub const RECYCLE_RADIUS_FACTOR: f32 = 1.5;
}

/// Wrap a coordinate to the opposite edge once it leaves [-bound, bound]
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}

/// Unit facing vector for a yaw/pitch pair (yaw 0, pitch 0 faces -Z)
#[inline]
pub fn facing_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        yaw.sin() * pitch.cos(),
        -pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Normalize, failing instead of producing NaN for zero-length input
#[inline]
pub fn safe_normalize(v: Vec3, context: &'static str) -> Result<Vec3, SimError> {
    v.try_normalize()
        .ok_or(SimError::DegenerateVector { context })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(301.0, 300.0), -300.0);
        assert_eq!(wrap_axis(-300.5, 300.0), 300.0);
        assert_eq!(wrap_axis(300.0, 300.0), 300.0);
        assert_eq!(wrap_axis(12.0, 300.0), 12.0);
    }

    #[test]
    fn test_facing_default_is_forward() {
        let f = facing_from_yaw_pitch(0.0, 0.0);
        assert!((f - Vec3::NEG_Z).length() < 1e-6);
        let f = facing_from_yaw_pitch(0.7, -0.3);
        assert!((f.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_safe_normalize_rejects_zero() {
        assert!(safe_normalize(Vec3::ZERO, "test").is_err());
        let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0), "test").unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}
