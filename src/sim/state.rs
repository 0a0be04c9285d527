//! Simulation value types
//!
//! Geometry (field, avatar, falling objects) plus the enums describing where an
//! attempt stands. None of these carry behavior beyond construction and
//! bounds-clamped movement; the engine owns and mutates them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clamp_inset;
use crate::consts::*;
use crate::error::EngineError;

/// Outcome of the current attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Won,
    Lost,
}

/// Whether the clock is driving the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Stopped,
    Active,
    Paused,
}

/// Combined view of `RunState` and `GameResult`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Waiting for `start()`
    Idle,
    Active,
    Paused,
    Won,
    Lost,
}

impl EnginePhase {
    pub fn from_parts(running: RunState, result: GameResult) -> Self {
        match (result, running) {
            (GameResult::Won, _) => EnginePhase::Won,
            (GameResult::Lost, _) => EnginePhase::Lost,
            (GameResult::InProgress, RunState::Active) => EnginePhase::Active,
            (GameResult::InProgress, RunState::Paused) => EnginePhase::Paused,
            (GameResult::InProgress, RunState::Stopped) => EnginePhase::Idle,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EnginePhase::Won | EnginePhase::Lost)
    }
}

/// Notable things that happened during a frame or command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32 },
    Collision { id: u32, payload: u32, weight: u32 },
    Won { level: u32, points: u32 },
    Lost { level: u32, weight: u32 },
    LevelAdvanced { level: u32, highest_level: u32 },
    ProgressReset,
}

/// Play-field bounds supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl FieldSize {
    /// Non-positive or non-finite sizes are a caller bug and are rejected
    pub fn new(width: f32, height: f32) -> Result<Self, EngineError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidFieldSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Accumulated weight; may overshoot the ceiling on the losing hit
    pub weight: u32,
    /// Extent (diameter)
    pub size: f32,
}

impl Avatar {
    /// Fresh avatar centered horizontally near the bottom of the field
    pub fn spawn(field: &FieldSize, weight: u32, size: f32) -> Self {
        let start = Vec2::new(field.width / 2.0, field.height - AVATAR_BOTTOM_OFFSET);
        Self {
            pos: clamp_inset(start, field.extent(), size / 2.0),
            weight,
            size,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Move to `target`, clamped so the avatar stays fully inside the field
    pub fn move_to(&mut self, target: Vec2, field: &FieldSize) {
        self.pos = clamp_inset(target, field.extent(), self.radius());
    }

    pub fn add_weight(&mut self, payload: u32) {
        self.weight = self.weight.saturating_add(payload);
    }
}

/// A burger falling through the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub pos: Vec2,
    /// Downward speed (pixels per time-unit)
    pub velocity: f32,
    /// Weight added to the avatar on impact
    pub payload: u32,
    /// Visual extent (diameter)
    pub size: f32,
}

impl FallingObject {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Advance by one timestep
    #[inline]
    pub fn fall(&mut self, dt: f32) {
        self.pos.y += self.velocity * dt;
    }
}

/// RNG seed wrapper so a run can be reproduced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
