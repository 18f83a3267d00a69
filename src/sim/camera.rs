//! Camera controller
//!
//! Derives a view transform from the craft pose. Two modes:
//! - Chase: behind and above the craft, looking back at it
//! - Cockpit: fixed offset from the craft, looking along its facing

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::craft::PlayerCraft;
use crate::consts::*;
use crate::{SimError, safe_normalize};

/// Camera placement mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    Chase,
    Cockpit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::Cockpit,
            CameraMode::Cockpit => CameraMode::Chase,
        }
    }
}

/// Look-at view with an orthonormal basis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub eye: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub view: Mat4,
}

impl Default for ViewTransform {
    fn default() -> Self {
        // Menu backdrop pose; the basis is axis-aligned so this cannot fail
        Self::from_basis(MENU_CAMERA_POSITION, Vec3::NEG_Z, Vec3::X, Vec3::Y)
    }
}

impl ViewTransform {
    /// Build a view looking from `eye` along `facing`.
    ///
    /// Up is world up unless the facing is (near) parallel to it; then the
    /// right axis comes from the secondary reference axis instead.
    pub fn look_along(eye: Vec3, facing: Vec3) -> Result<Self, SimError> {
        let forward = safe_normalize(facing, "camera facing")?;

        let mut right = forward.cross(WORLD_UP);
        if right.length_squared() < PARALLEL_EPSILON {
            log::trace!("Camera facing near-vertical, using secondary reference axis");
            right = forward.cross(WORLD_FORWARD_REF);
        }
        let right = safe_normalize(right, "camera right axis")?;
        let up = right.cross(forward);

        Ok(Self::from_basis(eye, forward, right, up))
    }

    fn from_basis(eye: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            forward,
            right,
            up,
            view: Mat4::look_at_rh(eye, eye + forward, up),
        }
    }
}

/// Camera state owned by the simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub view: ViewTransform,
}

impl CameraRig {
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Recompute the view from the craft's current pose
    pub fn update(&mut self, craft: &PlayerCraft) -> Result<&ViewTransform, SimError> {
        let (eye, facing) = match self.mode {
            CameraMode::Cockpit => (craft.position + COCKPIT_OFFSET, craft.facing()),
            CameraMode::Chase => {
                let eye = craft.position - craft.facing() * CHASE_DISTANCE
                    + Vec3::new(0.0, CHASE_HEIGHT, 0.0);
                let facing = safe_normalize(craft.position - eye, "chase camera facing")?;
                (eye, facing)
            }
        };
        self.view = ViewTransform::look_along(eye, facing)?;
        Ok(&self.view)
    }
}
