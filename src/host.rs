//! Host-side plumbing
//!
//! `FrameDriver` turns real elapsed time into fixed physics frames, and
//! `SharedEngine` lets an input thread and a timer thread drive the same
//! engine. The lock serializes them, so a frame never sees a half-applied move.

use std::sync::{Arc, Mutex};

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::error::EngineError;
use crate::sim::{GameEvent, SimulationEngine, Snapshot, TickInput};

/// What a shared host frame produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    /// Events drained from the engine during this call
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

/// Fixed-timestep accumulator for a real-time host
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
    input: TickInput,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a player move for the next frame
    pub fn queue_move(&mut self, target: Vec2) {
        self.input.target = Some(target);
    }

    pub fn set_idle_mode(&mut self, enabled: bool) {
        self.input.idle_mode = enabled;
    }

    /// Feed `dt` of real time and run the frames it pays for.
    /// Returns the number of physics frames run.
    pub fn update(&mut self, engine: &mut SimulationEngine, dt: f32) -> u32 {
        let sim_dt = 1.0 / engine.tuning().tick_rate as f32;
        let max_substeps = engine.tuning().max_substeps;

        // Long stalls (backgrounded app, debugger) never turn into a burst
        if dt.is_finite() {
            self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        }

        let mut substeps = 0;
        while self.accumulator >= sim_dt && substeps < max_substeps {
            if !engine.step(&self.input) {
                // Not running: don't bank time or moves for a later resume
                self.accumulator = 0.0;
                self.input.target = None;
                break;
            }
            self.accumulator -= sim_dt;
            substeps += 1;

            // Moves are one-shot
            self.input.target = None;
        }
        substeps
    }

    /// Same as [`update`](Self::update) on a shared engine. Drains the
    /// engine's event queue and returns it with the snapshot taken after the
    /// completed frames.
    pub fn update_shared(
        &mut self,
        shared: &SharedEngine,
        dt: f32,
    ) -> Result<FrameReport, EngineError> {
        shared.with(|engine| {
            let frames = self.update(engine, dt);
            FrameReport {
                frames,
                events: engine.drain_events(),
                snapshot: engine.snapshot(),
            }
        })
    }
}

/// Cloneable, thread-safe handle to one engine
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<SimulationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// A panic inside a previous call poisons the handle and every later call
    /// fails with [`EngineError::Poisoned`].
    pub fn with<R>(&self, f: impl FnOnce(&mut SimulationEngine) -> R) -> Result<R, EngineError> {
        let mut engine = self.inner.lock().map_err(|_| EngineError::Poisoned)?;
        Ok(f(&mut engine))
    }

    pub fn move_player(&self, target: Vec2) -> Result<(), EngineError> {
        self.with(|engine| engine.move_player(target))
    }

    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        self.with(|engine| engine.snapshot())
    }
}
