//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod engine;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::{DueActions, PeriodicAction, SimulationClock};
pub use collision::{Collision, circles_overlap, first_overlap, resolve};
pub use engine::{ObjectView, SimulationEngine, Snapshot};
pub use level::LevelSpec;
pub use state::{
    Avatar, EnginePhase, FallingObject, FieldSize, GameEvent, GameResult, RngState, RunState,
};
pub use tick::{TickInput, advance_objects, autopilot_target, prune_offscreen, spawn_object};
