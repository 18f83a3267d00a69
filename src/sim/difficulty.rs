//! Difficulty curve
//!
//! Difficulty is never stored: it is a pure function of elapsed play time.

use serde::Serialize;

use crate::tuning::FieldTuning;

/// Difficulty values derived for one instant of play time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    /// Multiplier applied to freshly spawned obstacle speed
    pub speed_multiplier: f32,
    /// Maximum live obstacles
    pub population_cap: usize,
    /// Whether spawn bursts may happen
    pub bursts_enabled: bool,
}

impl Difficulty {
    pub fn at(elapsed: f32, tuning: &FieldTuning) -> Self {
        Self {
            speed_multiplier: speed_multiplier(elapsed, tuning),
            population_cap: population_cap(elapsed, tuning),
            bursts_enabled: elapsed > tuning.burst_after_secs,
        }
    }
}

/// 1 + k·t, unbounded (final speed is capped separately)
#[inline]
pub fn speed_multiplier(elapsed: f32, tuning: &FieldTuning) -> f32 {
    1.0 + elapsed.max(0.0) * tuning.difficulty_per_sec
}

/// min(max_cap, floor(base + growth·t))
#[inline]
pub fn population_cap(elapsed: f32, tuning: &FieldTuning) -> usize {
    let grown = (tuning.base_cap + elapsed.max(0.0) * tuning.cap_growth_per_sec).floor();
    (grown as usize).min(tuning.max_cap)
}

/// Scale a base speed by difficulty, then clamp to the hard ceiling
#[inline]
pub fn scaled_speed(base: f32, multiplier: f32, tuning: &FieldTuning) -> f32 {
    (base * multiplier).min(tuning.max_speed)
}
