//! Collision detection between the craft and the obstacle pool
//!
//! Point-sphere only: a hit is any obstacle whose center lies closer to the
//! craft than the sum of both radii. Rate limiting is the caller's job (the
//! cooldown gate in `tick`), never the distance test's.

use glam::Vec3;

use super::field::Obstacle;

/// A detected craft/obstacle overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Pool index of the struck obstacle (valid until the pool changes)
    pub index: usize,
    /// Stable id of the struck obstacle
    pub obstacle_id: u32,
    /// Center distance at detection
    pub distance: f32,
    /// Sum of radii the distance was tested against
    pub contact_distance: f32,
}

impl CollisionEvent {
    /// How deep the spheres overlap
    pub fn penetration(&self) -> f32 {
        self.contact_distance - self.distance
    }
}

/// Return the first obstacle (pool order) overlapping the craft, if any
pub fn check_collisions(
    craft_position: Vec3,
    craft_radius: f32,
    obstacles: &[Obstacle],
) -> Option<CollisionEvent> {
    obstacles.iter().enumerate().find_map(|(index, obstacle)| {
        let distance = craft_position.distance(obstacle.position);
        let contact_distance = craft_radius + obstacle.radius;
        (distance < contact_distance).then_some(CollisionEvent {
            index,
            obstacle_id: obstacle.id,
            distance,
            contact_distance,
        })
    })
}

/// Whether enough play time has passed since the last penalty
#[inline]
pub fn cooldown_elapsed(elapsed: f32, last_collision: f32, cooldown: f32) -> bool {
    elapsed - last_collision > cooldown
}
