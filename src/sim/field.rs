//! Obstacle field
//!
//! Owns the live asteroid pool. Each frame obstacles advance along their
//! direction, leave the pool when they pass the craft or drift out of the
//! play volume, and new ones spawn on a cadence under the difficulty curve.
//!
//! The pool is a plain `Vec` culled with `swap_remove`, so iteration order is
//! not meaningful and removal never shifts the tail.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, scaled_speed, speed_multiplier};
use crate::consts::*;
use crate::tuning::FieldTuning;
use crate::{SimError, safe_normalize};

/// Asteroid tints (cosmetic only)
pub const OBSTACLE_PALETTE: [[f32; 3]; 6] = [
    [0.6, 0.5, 0.4],
    [0.5, 0.4, 0.3],
    [0.7, 0.6, 0.5],
    [0.4, 0.4, 0.4],
    [0.8, 0.7, 0.6],
    [0.3, 0.3, 0.2],
];

/// Stream offset for the tint RNG so cosmetics never share the gameplay stream
const TINT_STREAM_SALT: u64 = 0x7a11_c0de;

/// A moving asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec3,
    /// Unit direction of travel
    pub direction: Vec3,
    pub speed: f32,
    /// Visual scale
    pub scale: f32,
    /// Collision sphere radius
    pub radius: f32,
    /// Index into `OBSTACLE_PALETTE`
    pub tint: u8,
}

impl Obstacle {
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
    }

    pub fn color(&self) -> [f32; 3] {
        OBSTACLE_PALETTE[self.tint as usize % OBSTACLE_PALETTE.len()]
    }

    /// Re-spawn this same instance far ahead of the craft, aimed near the origin.
    ///
    /// Used after an impact so the pool size stays unchanged.
    pub fn recycle_to_far_position(
        &mut self,
        rng: &mut impl Rng,
        tint: u8,
        max_speed: f32,
    ) -> Result<(), SimError> {
        self.position = Vec3::new(
            rng.random_range(-RECYCLE_X..RECYCLE_X),
            rng.random_range(-RECYCLE_Y..RECYCLE_Y),
            rng.random_range(RECYCLE_Z_FAR..RECYCLE_Z_NEAR),
        );
        let target = Vec3::new(
            rng.random_range(-RECYCLE_TARGET_XY..RECYCLE_TARGET_XY),
            rng.random_range(-RECYCLE_TARGET_XY..RECYCLE_TARGET_XY),
            RECYCLE_TARGET_Z,
        );
        self.direction = safe_normalize(target - self.position, "recycle direction")?;
        self.speed = rng
            .random_range(RECYCLE_SPEED_MIN..RECYCLE_SPEED_MAX)
            .min(max_speed);
        self.scale = rng.random_range(RECYCLE_SCALE_MIN..RECYCLE_SCALE_MAX);
        self.radius = self.scale * RECYCLE_RADIUS_FACTOR;
        self.tint = tint;
        Ok(())
    }
}

/// How a new obstacle picks its start point and heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStrategy {
    /// Converge on the craft's last known position
    Intercepting,
    /// Anywhere in the far box, aimed near the origin
    Random,
}

/// Why an obstacle left the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// Crossed the pass-through plane behind the craft
    Passed,
    /// Drifted out of the play volume
    OutOfBounds,
}

fn exit_kind(position: Vec3, tuning: &FieldTuning) -> Option<Exit> {
    if position.z > tuning.pass_through_z {
        Some(Exit::Passed)
    } else if position.x.abs() > tuning.cull_x
        || position.y.abs() > tuning.cull_y
        || position.z < tuning.cull_far_z
    {
        Some(Exit::OutOfBounds)
    } else {
        None
    }
}

/// What happened to the pool during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// Removed for passing the craft
    pub avoided: u32,
    /// Removed silently for leaving the play volume
    pub culled: u32,
    /// Newly spawned (including bursts)
    pub spawned: u32,
}

/// Start point, heading and base speed for an intercepting spawn
pub fn intercepting_spawn(
    rng: &mut impl Rng,
    craft_position: Vec3,
) -> Result<(Vec3, Vec3, f32), SimError> {
    let distance = rng.random_range(INTERCEPT_DISTANCE_MIN..INTERCEPT_DISTANCE_MAX);
    let angle = rng.random_range(0.0..TAU);
    let depth = rng.random_range(INTERCEPT_DEPTH_MIN..INTERCEPT_DEPTH_MAX);
    let start = Vec3::new(
        craft_position.x + angle.cos() * distance,
        craft_position.y + angle.sin() * distance,
        craft_position.z - depth,
    );

    let base = safe_normalize(craft_position - start, "intercept heading")?;
    let jitter = Vec3::new(
        rng.random_range(-INTERCEPT_JITTER..INTERCEPT_JITTER),
        rng.random_range(-INTERCEPT_JITTER..INTERCEPT_JITTER),
        rng.random_range(0.0..INTERCEPT_FORWARD_BIAS),
    );
    let direction = safe_normalize(base + jitter, "intercept heading")?;
    let speed = rng.random_range(INTERCEPT_SPEED_MIN..INTERCEPT_SPEED_MAX);
    Ok((start, direction, speed))
}

/// Start point, heading and base speed for a random spawn
pub fn random_spawn(rng: &mut impl Rng) -> Result<(Vec3, Vec3, f32), SimError> {
    let start = Vec3::new(
        rng.random_range(-RANDOM_SPAWN_X..RANDOM_SPAWN_X),
        rng.random_range(-RANDOM_SPAWN_Y..RANDOM_SPAWN_Y),
        rng.random_range(RANDOM_SPAWN_Z_FAR..RANDOM_SPAWN_Z_NEAR),
    );
    let target = Vec3::new(
        rng.random_range(-RANDOM_TARGET_XY..RANDOM_TARGET_XY),
        rng.random_range(-RANDOM_TARGET_XY..RANDOM_TARGET_XY),
        rng.random_range(RANDOM_TARGET_Z_MIN..RANDOM_TARGET_Z_MAX),
    );
    let direction = safe_normalize(target - start, "random heading")?;
    let speed = rng.random_range(RANDOM_SPEED_MIN..RANDOM_SPEED_MAX);
    Ok((start, direction, speed))
}

/// The managed pool of asteroids for one play session
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    next_id: u32,
    tint_rng: Pcg32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
            tint_rng: Pcg32::seed_from_u64(seed ^ TINT_STREAM_SALT),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn pick_tint(&mut self) -> u8 {
        self.tint_rng.random_range(0..OBSTACLE_PALETTE.len()) as u8
    }

    /// Drop every obstacle and the spawn cadence
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
    }

    /// Clear and seed a fresh population for a new game
    pub fn reset(
        &mut self,
        craft_position: Vec3,
        rng: &mut impl Rng,
        tuning: &FieldTuning,
    ) -> Result<(), SimError> {
        self.clear();
        for _ in 0..tuning.initial_count {
            self.spawn(craft_position, 0.0, rng, tuning)?;
        }
        log::debug!("Seeded obstacle field with {} obstacles", self.obstacles.len());
        Ok(())
    }

    /// Place an obstacle directly (tools, tests, scripted setups)
    pub fn place(&mut self, position: Vec3, direction: Vec3, speed: f32, scale: f32) -> Result<u32, SimError> {
        let direction = safe_normalize(direction, "placed obstacle heading")?;
        let id = self.next_entity_id();
        let tint = self.pick_tint();
        self.obstacles.push(Obstacle {
            id,
            position,
            direction,
            speed,
            scale,
            radius: scale * SPAWN_RADIUS_FACTOR,
            tint,
        });
        Ok(id)
    }

    /// Spawn one obstacle with a randomly chosen strategy
    pub fn spawn(
        &mut self,
        craft_position: Vec3,
        elapsed: f32,
        rng: &mut impl Rng,
        tuning: &FieldTuning,
    ) -> Result<SpawnStrategy, SimError> {
        let strategy = if rng.random_bool(tuning.intercept_chance) {
            SpawnStrategy::Intercepting
        } else {
            SpawnStrategy::Random
        };
        let (position, direction, base_speed) = match strategy {
            SpawnStrategy::Intercepting => intercepting_spawn(rng, craft_position)?,
            SpawnStrategy::Random => random_spawn(rng)?,
        };
        let speed = scaled_speed(base_speed, speed_multiplier(elapsed, tuning), tuning);
        let scale = rng.random_range(SPAWN_SCALE_MIN..SPAWN_SCALE_MAX);

        let id = self.next_entity_id();
        let tint = self.pick_tint();
        log::trace!("Spawned obstacle {id} ({strategy:?}) at {position} speed {speed:.1}");
        self.obstacles.push(Obstacle {
            id,
            position,
            direction,
            speed,
            scale,
            radius: scale * SPAWN_RADIUS_FACTOR,
            tint,
        });
        Ok(strategy)
    }

    /// Recycle the obstacle at `index` in place (pool size unchanged)
    pub fn recycle_to_far_position(
        &mut self,
        index: usize,
        rng: &mut impl Rng,
        tuning: &FieldTuning,
    ) -> Result<(), SimError> {
        let tint = self.pick_tint();
        if let Some(obstacle) = self.obstacles.get_mut(index) {
            obstacle.recycle_to_far_position(rng, tint, tuning.max_speed)?;
            log::trace!("Recycled obstacle {} to {}", obstacle.id, obstacle.position);
        }
        Ok(())
    }

    /// Advance, cull and replenish the pool for one frame
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        craft_position: Vec3,
        rng: &mut impl Rng,
        tuning: &FieldTuning,
    ) -> Result<FieldReport, SimError> {
        let mut report = FieldReport::default();
        self.spawn_timer += dt;

        // swap_remove pulls an un-advanced obstacle into slot i, so i only
        // moves on when the current slot survives.
        let mut i = 0;
        while i < self.obstacles.len() {
            let obstacle = &mut self.obstacles[i];
            obstacle.advance(dt);
            match exit_kind(obstacle.position, tuning) {
                Some(Exit::Passed) => {
                    self.obstacles.swap_remove(i);
                    report.avoided += 1;
                }
                Some(Exit::OutOfBounds) => {
                    self.obstacles.swap_remove(i);
                    report.culled += 1;
                }
                None => i += 1,
            }
        }

        let difficulty = Difficulty::at(elapsed, tuning);
        if self.spawn_timer > tuning.spawn_interval
            && self.obstacles.len() < difficulty.population_cap
        {
            self.spawn(craft_position, elapsed, rng, tuning)?;
            report.spawned += 1;
            self.spawn_timer = 0.0;

            if difficulty.bursts_enabled && rng.random_bool(tuning.burst_chance) {
                let mut burst = 0;
                for _ in 0..tuning.burst_size {
                    if self.obstacles.len() >= difficulty.population_cap {
                        break;
                    }
                    self.spawn(craft_position, elapsed, rng, tuning)?;
                    burst += 1;
                }
                report.spawned += burst;
                log::debug!("Spawn burst of {burst} at t={elapsed:.1}s");
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::population_cap;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(4242)
    }

    #[test]
    fn test_reset_seeds_initial_population() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(1);
        let mut rng = rng();
        field.reset(Vec3::ZERO, &mut rng, &tuning).unwrap();

        assert_eq!(field.len(), 35);
        let mut ids: Vec<u32> = field.obstacles().iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 35);
        for o in field.obstacles() {
            assert!(o.speed <= tuning.max_speed);
            assert!((o.radius - o.scale * 1.6).abs() < 1e-4);
            assert!((o.direction.length() - 1.0).abs() < 1e-4);
            assert!((6.0..10.0).contains(&o.scale));
        }

        field.reset(Vec3::ZERO, &mut rng, &tuning).unwrap();
        assert_eq!(field.len(), 35);
    }

    #[test]
    fn test_pass_through_counts_as_avoided() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(1);
        field.place(Vec3::new(0.0, 0.0, 149.0), Vec3::Z, 100.0, 5.0).unwrap();
        field.place(Vec3::new(0.0, 0.0, -100.0), Vec3::Z, 100.0, 5.0).unwrap();

        let report = field
            .update(0.05, 0.0, Vec3::ZERO, &mut rng(), &tuning)
            .unwrap();
        assert_eq!(report.avoided, 1);
        assert_eq!(report.culled, 0);
        assert_eq!(report.spawned, 0);
        assert_eq!(field.len(), 1);
        assert!((field.obstacles()[0].position.z - -95.0).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_bounds_is_silent() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(1);
        field.place(Vec3::new(1499.0, 0.0, -100.0), Vec3::X, 100.0, 5.0).unwrap();
        field.place(Vec3::new(0.0, -1199.0, -100.0), Vec3::NEG_Y, 100.0, 5.0).unwrap();
        field.place(Vec3::new(0.0, 0.0, -1199.0), Vec3::NEG_Z, 100.0, 5.0).unwrap();

        let report = field
            .update(0.05, 0.0, Vec3::ZERO, &mut rng(), &tuning)
            .unwrap();
        assert_eq!(report.avoided, 0);
        assert_eq!(report.culled, 3);
        assert!(field.is_empty());
    }

    #[test]
    fn test_each_obstacle_advances_once_despite_swap_remove() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(1);
        // First leaves, the last one gets swapped into slot 0
        field.place(Vec3::new(0.0, 0.0, 149.9), Vec3::Z, 10.0, 4.0).unwrap();
        field.place(Vec3::new(10.0, 0.0, -500.0), Vec3::Z, 10.0, 4.0).unwrap();
        let last = field.place(Vec3::new(20.0, 0.0, -500.0), Vec3::Z, 10.0, 4.0).unwrap();

        field.update(0.1, 0.0, Vec3::ZERO, &mut rng(), &tuning).unwrap();
        assert_eq!(field.len(), 2);
        for o in field.obstacles() {
            assert!((o.position.z - -499.0).abs() < 1e-4, "{o:?}");
        }
        assert_eq!(field.obstacles()[0].id, last);
    }

    #[test]
    fn test_recycle_keeps_pool_size() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(1);
        let id = field.place(Vec3::ZERO, Vec3::Z, 100.0, 8.0).unwrap();
        field.place(Vec3::new(50.0, 0.0, 0.0), Vec3::Z, 100.0, 8.0).unwrap();

        field.recycle_to_far_position(0, &mut rng(), &tuning).unwrap();
        assert_eq!(field.len(), 2);
        let o = &field.obstacles()[0];
        assert_eq!(o.id, id);
        assert!(o.position.x.abs() <= 400.0 && o.position.y.abs() <= 300.0);
        assert!((-1000.0..=-600.0).contains(&o.position.z));
        assert!((80.0..200.0).contains(&o.speed));
        assert!((3.0..5.0).contains(&o.scale));
        assert!((o.radius - o.scale * 1.5).abs() < 1e-4);
        assert!(o.direction.z > 0.0);
    }

    #[test]
    fn test_population_respects_cap_and_speed_ceiling() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(9);
        let mut rng = rng();
        field.reset(Vec3::ZERO, &mut rng, &tuning).unwrap();

        let dt = 1.0 / 60.0;
        let mut elapsed = 0.0;
        for _ in 0..(60 * 120) {
            elapsed += dt;
            field.update(dt, elapsed, Vec3::ZERO, &mut rng, &tuning).unwrap();
            assert!(field.len() <= population_cap(elapsed, &tuning));
        }
        for o in field.obstacles() {
            assert!(o.speed <= tuning.max_speed);
        }
    }

    #[test]
    fn test_late_spawns_are_speed_capped() {
        let tuning = FieldTuning::default();
        let mut field = ObstacleField::new(3);
        let mut rng = rng();
        for _ in 0..200 {
            field.spawn(Vec3::ZERO, 5000.0, &mut rng, &tuning).unwrap();
        }
        assert!(field.obstacles().iter().all(|o| o.speed == tuning.max_speed));
    }

    #[test]
    fn test_intercepting_spawn_heads_for_craft() {
        let mut rng = rng();
        let craft = Vec3::new(40.0, -20.0, 10.0);
        for _ in 0..100 {
            let (start, dir, speed) = intercepting_spawn(&mut rng, craft).unwrap();
            let planar = (start.truncate() - craft.truncate()).length();
            assert!((800.0..=2000.0).contains(&planar));
            assert!((craft.z - start.z) >= 300.0 && (craft.z - start.z) <= 700.0);
            assert!(dir.dot((craft - start).normalize()) > 0.8);
            assert!((120.0..300.0).contains(&speed));
        }
    }

    #[test]
    fn test_random_spawn_box() {
        let mut rng = rng();
        for _ in 0..100 {
            let (start, dir, speed) = random_spawn(&mut rng).unwrap();
            assert!(start.x.abs() <= 1000.0 && start.y.abs() <= 800.0);
            assert!((-1000.0..=-200.0).contains(&start.z));
            assert!(dir.z > 0.0);
            assert!((100.0..250.0).contains(&speed));
        }
    }

    #[test]
    fn test_tints_do_not_touch_gameplay_rng() {
        let tuning = FieldTuning::default();
        let mut a = ObstacleField::new(1);
        let mut b = ObstacleField::new(2);
        a.reset(Vec3::ZERO, &mut rng(), &tuning).unwrap();
        b.reset(Vec3::ZERO, &mut rng(), &tuning).unwrap();
        for (oa, ob) in a.obstacles().iter().zip(b.obstacles()) {
            assert_eq!(oa.position, ob.position);
            assert_eq!(oa.speed, ob.speed);
        }
    }
}
