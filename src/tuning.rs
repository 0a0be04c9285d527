//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a host can ship a JSON
//! override without recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// Per-level difficulty curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Weight ceiling at level 1
    pub ceiling_base: u32,
    /// Ceiling reduction per level
    pub ceiling_step: u32,
    /// Ceiling never drops below this
    pub ceiling_floor: u32,
    /// Spawn interval at level 1 (time-units)
    pub spawn_base: f32,
    /// Spawn interval reduction per level
    pub spawn_step: f32,
    /// Spawn interval never drops below this
    pub spawn_floor: f32,
    /// Time to survive to win a level
    pub survival_duration: f32,
    /// Fall speed at level 0 (pixels per time-unit)
    pub velocity_base: f32,
    /// Extra fall speed per level
    pub velocity_per_level: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            ceiling_base: 200,
            ceiling_step: 20,
            ceiling_floor: 100,
            spawn_base: 1.0,
            spawn_step: 0.1,
            spawn_floor: 0.3,
            survival_duration: 60.0,
            velocity_base: 100.0,
            velocity_per_level: 20.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub levels: LevelTuning,

    // === Avatar ===
    pub starting_weight: u32,
    /// Avatar extent (diameter); collision radius is half of this
    pub avatar_size: f32,

    // === Clock ===
    /// Physics frames per time-unit
    pub tick_rate: u32,
    /// Countdown step (time-units)
    pub countdown_period: f32,

    // === Falling objects ===
    /// Horizontal spawn keep-out from each side
    pub spawn_margin: f32,
    /// Objects are pruned once they fall this far past the bottom edge
    pub offscreen_margin: f32,
    pub payload_min: u32,
    pub payload_max: u32,
    pub object_size_min: f32,
    pub object_size_max: f32,
    /// Spawns are skipped while this many objects are active
    pub max_active_objects: usize,

    // === Scoring ===
    pub points_per_level: u32,

    // === Host ===
    /// Physics frames a single host frame may run
    pub max_substeps: u32,

    /// RNG seed for spawn placement and payloads
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            levels: LevelTuning::default(),

            starting_weight: STARTING_WEIGHT,
            avatar_size: AVATAR_SIZE,

            tick_rate: TICK_RATE,
            countdown_period: 0.1,

            spawn_margin: 50.0,
            offscreen_margin: 50.0,
            payload_min: 5,
            payload_max: 15,
            object_size_min: 30.0,
            object_size_max: 50.0,
            max_active_objects: 64,

            points_per_level: 10,

            max_substeps: 8,

            seed: 0x5EED_B0B0,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let finite_non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if self.tick_rate == 0 {
            return Err(EngineError::InvalidTuning("tick_rate must be non-zero"));
        }
        if !positive(self.countdown_period) {
            return Err(EngineError::InvalidTuning("countdown_period must be positive"));
        }
        if !positive(self.levels.survival_duration) {
            return Err(EngineError::InvalidTuning("survival_duration must be positive"));
        }
        if !positive(self.levels.spawn_floor) || !positive(self.levels.spawn_base) {
            return Err(EngineError::InvalidTuning("spawn intervals must be positive"));
        }
        if !positive(self.avatar_size) {
            return Err(EngineError::InvalidTuning("avatar_size must be positive"));
        }
        if self.payload_min > self.payload_max {
            return Err(EngineError::InvalidTuning("payload_min exceeds payload_max"));
        }
        if !self.levels.spawn_step.is_finite() {
            return Err(EngineError::InvalidTuning("spawn_step must be finite"));
        }
        if !self.levels.velocity_base.is_finite() || !self.levels.velocity_per_level.is_finite() {
            return Err(EngineError::InvalidTuning("object velocity must be finite"));
        }
        if !positive(self.object_size_min)
            || !positive(self.object_size_max)
            || self.object_size_min > self.object_size_max
        {
            return Err(EngineError::InvalidTuning("object size range is invalid"));
        }
        if !finite_non_negative(self.spawn_margin) {
            return Err(EngineError::InvalidTuning("spawn_margin must be finite and non-negative"));
        }
        if !self.offscreen_margin.is_finite() {
            return Err(EngineError::InvalidTuning("offscreen_margin must be finite"));
        }
        if self.max_substeps == 0 {
            return Err(EngineError::InvalidTuning("max_substeps must be non-zero"));
        }
        Ok(())
    }

    /// Countdown steps that make up one survival duration
    pub fn countdown_steps(&self) -> u32 {
        (self.levels.survival_duration / self.countdown_period).round() as u32
    }
}
