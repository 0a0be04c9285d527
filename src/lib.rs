//! Burger Dodge - simulation engine for a falling-object avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level formulas, clock, collisions, engine)
//! - `host`: Thread-safe handle and real-time frame driver
//! - `tuning`: Data-driven game balance
//! - `progress`: Counters reported to the progression layer

pub mod error;
pub mod host;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use error::EngineError;
pub use host::{FrameDriver, FrameReport, SharedEngine};
pub use progress::Progress;
pub use sim::{EnginePhase, GameResult, RunState, SimulationEngine, Snapshot};
pub use tuning::{LevelTuning, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Physics frames per time-unit
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Longest real-time slice a single host frame may consume
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Avatar defaults
    pub const STARTING_WEIGHT: u32 = 70;
    pub const AVATAR_SIZE: f32 = 60.0;
    /// Avatar spawns this far above the bottom edge
    pub const AVATAR_BOTTOM_OFFSET: f32 = 100.0;

    /// Falling objects spawn at this y, above the visible field
    pub const SPAWN_Y: f32 = -50.0;

    /// Field used until the host reports its real size
    pub const DEFAULT_FIELD_WIDTH: f32 = 375.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 667.0;
}

/// Clamp a point component-wise into `[inset, extent - inset]`.
///
/// Uses max/min rather than `f32::clamp` so a field narrower than `2 * inset`
/// pins the point to `inset` instead of panicking.
#[inline]
pub fn clamp_inset(point: Vec2, extent: Vec2, inset: f32) -> Vec2 {
    Vec2::new(
        inset.max((extent.x - inset).min(point.x)),
        inset.max((extent.y - inset).min(point.y)),
    )
}

/// Convert a period in time-units into whole physics frames (at least one)
#[inline]
pub fn period_to_frames(period: f32, tick_rate: u32) -> u32 {
    ((period * tick_rate as f32).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inset_inside_is_identity() {
        let p = clamp_inset(Vec2::new(100.0, 200.0), Vec2::new(375.0, 667.0), 30.0);
        assert_eq!(p, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_clamp_inset_narrow_field_pins_to_inset() {
        let p = clamp_inset(Vec2::new(500.0, -10.0), Vec2::new(40.0, 40.0), 30.0);
        assert_eq!(p, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_period_to_frames() {
        assert_eq!(period_to_frames(0.1, 60), 6);
        assert_eq!(period_to_frames(1.0, 60), 60);
        assert_eq!(period_to_frames(0.3, 60), 18);
        assert_eq!(period_to_frames(1.0 / 60.0, 60), 1);
        assert_eq!(period_to_frames(0.0, 60), 1);
    }
}
