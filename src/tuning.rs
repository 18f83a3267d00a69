//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Defaults reproduce the stock game; a JSON file can override any subset.

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Player craft handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTuning {
    /// Sphere radius used for collision tests
    pub collision_radius: f32,
    /// Lateral movement speed (units/s)
    pub lateral_speed: f32,
    /// X/Y wrap bound (craft reappears on the opposite edge)
    pub world_bounds: f32,
    /// Forward-axis clamp (|z| never exceeds this)
    pub forward_limit: f32,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            collision_radius: 1.5,
            lateral_speed: 60.0,
            world_bounds: 300.0,
            forward_limit: 50.0,
        }
    }
}

/// Obstacle field population, spawning and culling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Obstacles seeded at game start
    pub initial_count: usize,
    /// Population cap at t = 0
    pub base_cap: f32,
    /// Cap growth per elapsed second
    pub cap_growth_per_sec: f32,
    /// Absolute population ceiling
    pub max_cap: usize,
    /// Seconds between regular spawns
    pub spawn_interval: f32,
    /// Bursts only start after this much play time
    pub burst_after_secs: f32,
    /// Chance of a burst on each spawn cadence tick
    pub burst_chance: f64,
    /// Extra obstacles per burst
    pub burst_size: usize,
    /// Chance a spawn uses the intercepting strategy
    pub intercept_chance: f64,
    /// Speed multiplier growth per elapsed second
    pub difficulty_per_sec: f32,
    /// Hard speed ceiling for any obstacle
    pub max_speed: f32,
    /// Forward-axis pass-through threshold (counts as avoided)
    pub pass_through_z: f32,
    /// |x| beyond this is culled
    pub cull_x: f32,
    /// |y| beyond this is culled
    pub cull_y: f32,
    /// z below this is culled
    pub cull_far_z: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            initial_count: 35,
            base_cap: 35.0,
            cap_growth_per_sec: 0.8,
            max_cap: 60,
            spawn_interval: 0.2,
            burst_after_secs: 20.0,
            burst_chance: 0.15,
            burst_size: 2,
            intercept_chance: 0.6,
            difficulty_per_sec: 0.01,
            max_speed: 400.0,
            pass_through_z: 150.0,
            cull_x: 1500.0,
            cull_y: 1200.0,
            cull_far_z: -1200.0,
        }
    }
}

/// Lives, penalties and phase timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Lives at the start of each game
    pub starting_lives: u8,
    /// Minimum seconds between two collision penalties
    pub collision_cooldown: f32,
    /// Seconds in GameOver before the report is ready
    pub report_delay: f32,
    /// Seconds between frame diagnostics log lines
    pub diagnostics_interval: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            collision_cooldown: 2.0,
            report_delay: 5.0,
            diagnostics_interval: 5.0,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub craft: CraftTuning,
    pub field: FieldTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy as a template for overrides)
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the relationships the simulation relies on
    pub fn validate(&self) -> Result<(), SimError> {
        let f = &self.field;
        if f.max_cap < f.initial_count {
            return Err(SimError::InvalidTuning(format!(
                "max_cap ({}) is below initial_count ({})",
                f.max_cap, f.initial_count
            )));
        }
        if (f.base_cap.floor() as usize) < f.initial_count {
            return Err(SimError::InvalidTuning(format!(
                "base_cap ({}) is below initial_count ({})",
                f.base_cap, f.initial_count
            )));
        }
        let c = &self.craft;
        let sn = &self.session;
        for (name, value) in [
            ("craft.collision_radius", c.collision_radius),
            ("craft.world_bounds", c.world_bounds),
            ("field.max_speed", f.max_speed),
            ("field.cull_x", f.cull_x),
            ("field.cull_y", f.cull_y),
            ("session.diagnostics_interval", sn.diagnostics_interval),
        ] {
            require(name, value, value > 0.0, "positive")?;
        }
        for (name, value) in [
            ("craft.lateral_speed", c.lateral_speed),
            ("craft.forward_limit", c.forward_limit),
            ("field.base_cap", f.base_cap),
            ("field.cap_growth_per_sec", f.cap_growth_per_sec),
            ("field.spawn_interval", f.spawn_interval),
            ("field.burst_after_secs", f.burst_after_secs),
            ("field.difficulty_per_sec", f.difficulty_per_sec),
            ("session.collision_cooldown", sn.collision_cooldown),
            ("session.report_delay", sn.report_delay),
        ] {
            require(name, value, value >= 0.0, "non-negative")?;
        }
        for (name, value) in [
            ("field.pass_through_z", f.pass_through_z),
            ("field.cull_far_z", f.cull_far_z),
        ] {
            require(name, value, true, "finite")?;
        }
        for (name, p) in [
            ("field.burst_chance", f.burst_chance),
            ("field.intercept_chance", f.intercept_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidTuning(format!(
                    "{name} ({p}) must be within [0, 1]"
                )));
            }
        }
        if sn.starting_lives == 0 {
            return Err(SimError::InvalidTuning(
                "session.starting_lives must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Reject non-finite values and values failing `ok`
fn require(name: &str, value: f32, ok: bool, expected: &str) -> Result<(), SimError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(SimError::InvalidTuning(format!(
            "{name} ({value}) must be finite and {expected}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "session": { "collision_cooldown": 1.0 } }"#).unwrap();
        assert_eq!(t.session.collision_cooldown, 1.0);
        assert_eq!(t.session.starting_lives, 3);
        assert_eq!(t.field, FieldTuning::default());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        // JSON has no NaN literal, so these come in through code
        let mut tuning = Tuning::default();
        tuning.session.collision_cooldown = f32::NAN;
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));

        let mut tuning = Tuning::default();
        tuning.craft.lateral_speed = f32::INFINITY;
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));

        let mut tuning = Tuning::default();
        tuning.field.cull_far_z = f32::NEG_INFINITY;
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "field": { "max_cap": 10 } }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "field": { "burst_chance": 1.5 } }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "craft": { "forward_limit": -1.0 } }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "session": { "report_delay": -5.0 } }"#),
            Err(SimError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(SimError::TuningParse(_))
        ));
    }
}
