//! Read-only frame data for the render layer
//!
//! The render backend never touches `Simulation`; it gets an owned
//! `FrameSnapshot` once per frame, which is safe to hand to another thread.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use crate::consts::{DRAW_BEHIND_MARGIN, DRAW_DISTANCE};
use crate::sim::{CameraMode, GamePhase, Obstacle, Simulation, ViewTransform};

/// Per-obstacle instance data, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct ObstacleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl ObstacleInstance {
    pub fn from_obstacle(obstacle: &Obstacle) -> Self {
        Self {
            position: obstacle.position.to_array(),
            scale: obstacle.scale,
            color: obstacle.color(),
            _pad: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Raw bytes of an instance slice, ready for a buffer upload
pub fn instance_bytes(instances: &[ObstacleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Everything the render and HUD layers read for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub craft_position: Vec3,
    pub craft_facing: Vec3,
    pub camera_mode: CameraMode,
    pub view: ViewTransform,
    pub obstacles: Vec<ObstacleInstance>,
    pub lives: u8,
    pub elapsed: f32,
    pub obstacles_avoided: u32,
    /// One life left: HUD shows the warning border
    pub low_health: bool,
    pub report_ready: bool,
}

impl FrameSnapshot {
    pub fn capture<R: Rng>(sim: &Simulation<R>) -> Self {
        Self {
            phase: sim.phase(),
            craft_position: sim.craft().position,
            craft_facing: sim.craft().facing(),
            camera_mode: sim.camera_mode(),
            view: *sim.view(),
            obstacles: sim
                .field()
                .obstacles()
                .iter()
                .map(ObstacleInstance::from_obstacle)
                .collect(),
            lives: sim.lives(),
            elapsed: sim.elapsed(),
            obstacles_avoided: sim.obstacles_avoided(),
            low_health: sim.phase() == GamePhase::Playing && sim.lives() == 1,
            report_ready: sim.report_ready(),
        }
    }

    /// Whether the craft model should be drawn (hidden in cockpit view)
    pub fn draw_craft(&self) -> bool {
        self.phase == GamePhase::Playing && self.camera_mode == CameraMode::Chase
    }

    /// Obstacles worth drawing: within draw distance and not far behind the camera
    pub fn visible_instances(&self) -> impl Iterator<Item = &ObstacleInstance> {
        let eye = self.view.eye;
        self.obstacles.iter().filter(move |o| {
            let p = o.position();
            p.distance(eye) <= DRAW_DISTANCE && p.z <= eye.z + DRAW_BEHIND_MARGIN
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ObstacleInstance>(), 32);
        let instances = [ObstacleInstance::zeroed(); 3];
        assert_eq!(instance_bytes(&instances).len(), 96);
    }

    #[test]
    fn test_capture_mirrors_simulation() {
        let mut sim = Simulation::new(3, Tuning::default()).unwrap();
        let menu = sim.snapshot();
        assert_eq!(menu.phase, GamePhase::MainMenu);
        assert!(menu.obstacles.is_empty());
        assert!(!menu.draw_craft());

        sim.start_new_game().unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.obstacles.len(), sim.field().len());
        assert_eq!(snap.lives, 3);
        assert!(!snap.low_health);
        assert!(snap.draw_craft());
        for (inst, o) in snap.obstacles.iter().zip(sim.field().obstacles()) {
            assert_eq!(inst.position(), o.position);
            assert_eq!(inst.color, o.color());
        }
    }

    #[test]
    fn test_visible_instances_culls() {
        let mut sim = Simulation::new(3, Tuning::default()).unwrap();
        sim.start_new_game().unwrap();
        let field = sim.field_mut();
        field.clear();
        field.place(Vec3::new(0.0, 0.0, -100.0), Vec3::Z, 0.0, 5.0).unwrap();
        field.place(Vec3::new(0.0, 0.0, -1100.0), Vec3::Z, 0.0, 5.0).unwrap();
        field.place(Vec3::new(0.0, 0.0, 100.0), Vec3::Z, 0.0, 5.0).unwrap();

        let snap = sim.snapshot();
        // Chase eye sits at z = 25
        let visible: Vec<f32> = snap.visible_instances().map(|o| o.position[2]).collect();
        assert_eq!(visible, vec![-100.0]);
    }
}
