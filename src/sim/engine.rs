//! Simulation engine
//!
//! Composition root that owns the avatar, the active objects, the current
//! level and the clock, and runs the win/lose state machine. Every mutation
//! goes through the methods here; hosts read state back through accessors or
//! a [`Snapshot`] taken after a frame.
//!
//! Frame order: spawn (if due) -> player move -> physics (fall, prune,
//! collide, loss check) -> countdown (win check).

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::clock::SimulationClock;
use super::collision;
use super::level::LevelSpec;
use super::state::{
    Avatar, EnginePhase, FallingObject, FieldSize, GameEvent, GameResult, RngState, RunState,
};
use super::tick::{TickInput, advance_objects, autopilot_target, prune_offscreen, spawn_object};
use crate::error::EngineError;
use crate::progress::Progress;
use crate::tuning::Tuning;

/// Render-facing view of one falling object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
}

/// Read-only copy of everything a host renders or reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: EnginePhase,
    pub result: GameResult,
    pub running: RunState,
    pub level: u32,
    pub weight_ceiling: u32,
    pub remaining_time: f32,
    pub avatar_pos: Vec2,
    pub avatar_weight: u32,
    pub avatar_size: f32,
    pub objects: Vec<ObjectView>,
    pub points_on_win: u32,
    pub games_played: u32,
    pub highest_level: u32,
}

/// The game simulation for one player
#[derive(Debug)]
pub struct SimulationEngine {
    tuning: Tuning,
    field: FieldSize,
    avatar: Avatar,
    /// Active objects in spawn order
    objects: Vec<FallingObject>,
    level: LevelSpec,
    /// Countdown steps left in the attempt
    remaining_steps: u32,
    result: GameResult,
    running: RunState,
    clock: SimulationClock,
    progress: Progress,
    rng_state: RngState,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::build(FieldSize::default(), Tuning::default())
    }
}

impl SimulationEngine {
    /// Create an idle engine at level 1
    pub fn new(field: FieldSize, tuning: Tuning) -> Result<Self, EngineError> {
        tuning.validate()?;
        Ok(Self::build(field, tuning))
    }

    fn build(field: FieldSize, tuning: Tuning) -> Self {
        let level = LevelSpec::derive_with(1, &tuning.levels);
        let rng_state = RngState::new(tuning.seed);
        let clock = SimulationClock::new(
            tuning.tick_rate,
            tuning.countdown_period,
            level.spawn_interval,
        );

        Self {
            avatar: Avatar::spawn(&field, tuning.starting_weight, tuning.avatar_size),
            objects: Vec::new(),
            remaining_steps: tuning.countdown_steps(),
            result: GameResult::InProgress,
            running: RunState::Stopped,
            clock,
            progress: Progress::default(),
            rng: rng_state.to_rng(),
            rng_state,
            next_id: 1,
            events: Vec::new(),
            level,
            field,
            tuning,
        }
    }

    /// Restore counters previously reported to the progression layer
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    // === Commands ===

    /// Set the play-field bounds.
    ///
    /// Outside an attempt the avatar is replaced by a fresh one at the bottom
    /// center. Mid-attempt the avatar and its weight are kept and only its
    /// position is clamped into the new bounds.
    pub fn configure(&mut self, width: f32, height: f32) -> Result<(), EngineError> {
        let field = FieldSize::new(width, height)?;
        self.field = field;

        match self.running {
            RunState::Active | RunState::Paused => {
                let pos = self.avatar.pos;
                self.avatar.move_to(pos, &self.field);
            }
            RunState::Stopped => {
                self.avatar = self.fresh_avatar();
            }
        }
        log::debug!("Field configured to {}x{}", width, height);
        Ok(())
    }

    /// Begin an attempt at the current level.
    ///
    /// Rejected while an attempt is active or paused; use
    /// [`restart_level`](Self::restart_level) to throw the current attempt away.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if matches!(self.running, RunState::Active | RunState::Paused) {
            log::warn!("start() ignored: attempt already in progress");
            return Err(EngineError::AttemptInProgress);
        }
        self.begin_attempt();
        Ok(())
    }

    fn begin_attempt(&mut self) {
        self.reset_attempt();
        self.running = RunState::Active;
        self.clock.arm_all();
        log::info!(
            "Level {} started (ceiling {}, spawn every {:.2})",
            self.level.index,
            self.level.weight_ceiling,
            self.level.spawn_interval
        );
    }

    /// Return to idle with a fresh avatar, no objects and a full timer
    fn reset_attempt(&mut self) {
        self.clock.cancel_all();
        self.clock.set_spawn_interval(self.level.spawn_interval);
        self.clock.reset_frame();
        self.avatar = self.fresh_avatar();
        self.objects.clear();
        self.remaining_steps = self.tuning.countdown_steps();
        self.result = GameResult::InProgress;
        self.running = RunState::Stopped;
    }

    fn fresh_avatar(&self) -> Avatar {
        Avatar::spawn(&self.field, self.tuning.starting_weight, self.tuning.avatar_size)
    }

    /// Freeze the attempt. No-op unless active.
    pub fn pause(&mut self) {
        if self.running != RunState::Active {
            log::debug!("pause() ignored in {:?}", self.phase());
            return;
        }
        self.clock.cancel_all();
        self.running = RunState::Paused;
        log::info!("Paused at {:.1} remaining", self.remaining_time());
    }

    /// Continue a paused attempt on fresh schedules. No-op unless paused.
    pub fn resume(&mut self) {
        if self.running != RunState::Paused {
            log::debug!("resume() ignored in {:?}", self.phase());
            return;
        }
        self.clock.arm_all();
        self.running = RunState::Active;
        log::info!("Resumed");
    }

    /// Abort to idle. Objects are discarded; avatar weight and level stay
    /// until the next `start()`.
    pub fn stop(&mut self) {
        self.clock.cancel_all();
        self.objects.clear();
        self.running = RunState::Stopped;
        self.result = GameResult::InProgress;
        log::info!("Stopped");
    }

    /// Throw away the current attempt and start again at the same level
    pub fn restart_level(&mut self) {
        self.stop();
        self.begin_attempt();
    }

    /// Move on after a win. Returns the highest level reached for the
    /// progression layer to persist, or `None` when the last attempt was not won.
    pub fn advance_level(&mut self) -> Option<u32> {
        if self.result != GameResult::Won {
            log::debug!("advance_level() ignored in {:?}", self.phase());
            return None;
        }

        self.level = self.level.next(&self.tuning.levels);
        self.progress.record_level_reached(self.level.index);
        self.reset_attempt();

        let highest_level = self.progress.highest_level;
        self.events.push(GameEvent::LevelAdvanced {
            level: self.level.index,
            highest_level,
        });
        log::info!("Advanced to level {} (highest {})", self.level.index, highest_level);
        Some(highest_level)
    }

    /// Player drag. Clamped into the field; ignored unless active.
    pub fn move_player(&mut self, target: Vec2) {
        if self.running != RunState::Active {
            return;
        }
        self.avatar.move_to(target, &self.field);
    }

    /// Back to level 1 with all counters cleared
    pub fn reset_progress(&mut self) {
        self.level = LevelSpec::derive_with(1, &self.tuning.levels);
        self.progress.reset();
        self.reset_attempt();
        self.events.push(GameEvent::ProgressReset);
        log::info!("Progress reset");
    }

    // === Frame loop ===

    /// Run one physics frame. Returns false when the engine is not active.
    pub fn step(&mut self, input: &TickInput) -> bool {
        if self.running != RunState::Active {
            return false;
        }

        let due = self.clock.next_frame();

        if due.spawn {
            self.spawn();
        }

        let target = if input.idle_mode {
            Some(autopilot_target(&self.avatar, &self.objects, &self.field))
        } else {
            input.target
        };
        if let Some(target) = target {
            self.move_player(target);
        }

        if due.physics {
            self.physics_tick();
        }

        if due.countdown && self.running == RunState::Active {
            self.countdown_tick();
        }

        true
    }

    /// Run up to `frames` physics frames, stopping early on a terminal result.
    /// Returns the number of frames run.
    pub fn advance(&mut self, frames: u32, input: &TickInput) -> u32 {
        let mut ran = 0;
        while ran < frames && self.step(input) {
            ran += 1;
        }
        ran
    }

    fn spawn(&mut self) {
        if self.objects.len() >= self.tuning.max_active_objects {
            log::debug!("Spawn skipped: {} objects active", self.objects.len());
            return;
        }
        let id = self.next_entity_id();
        let obj = spawn_object(&mut self.rng, id, &self.field, &self.level, &self.tuning);
        self.objects.push(obj);
        self.events.push(GameEvent::Spawned { id });
    }

    fn physics_tick(&mut self) {
        advance_objects(&mut self.objects, self.clock.dt());
        prune_offscreen(
            &mut self.objects,
            self.field.height,
            self.tuning.offscreen_margin,
        );

        if let Some(hit) = collision::resolve(&mut self.avatar, &mut self.objects) {
            self.events.push(GameEvent::Collision {
                id: hit.object_id,
                payload: hit.payload,
                weight: self.avatar.weight,
            });
        }

        if self.avatar.weight >= self.level.weight_ceiling {
            self.finish(GameResult::Lost);
        }
    }

    fn countdown_tick(&mut self) {
        self.remaining_steps = self.remaining_steps.saturating_sub(1);
        if self.remaining_steps == 0 {
            self.finish(GameResult::Won);
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.clock.cancel_all();
        self.running = RunState::Stopped;
        self.result = result;
        self.progress.record_game();

        let level = self.level.index;
        match result {
            GameResult::Won => {
                let points = self.points_awarded_on_win();
                log::info!("Level {} won, {} points", level, points);
                self.events.push(GameEvent::Won { level, points });
            }
            GameResult::Lost => {
                let weight = self.avatar.weight;
                log::info!(
                    "Level {} lost at weight {} (ceiling {})",
                    level,
                    weight,
                    self.level.weight_ceiling
                );
                self.events.push(GameEvent::Lost { level, weight });
            }
            GameResult::InProgress => {}
        }
    }

    // === Published state ===

    /// Points a win at the current level is worth
    pub fn points_awarded_on_win(&self) -> u32 {
        self.level.index.saturating_mul(self.tuning.points_per_level)
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_steps as f32 * self.tuning.countdown_period
    }

    pub fn phase(&self) -> EnginePhase {
        EnginePhase::from_parts(self.running, self.result)
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn running(&self) -> RunState {
        self.running
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn level(&self) -> &LevelSpec {
        &self.level
    }

    pub fn field(&self) -> &FieldSize {
        &self.field
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn is_clock_armed(&self) -> bool {
        self.clock.is_armed()
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.clock.frame(),
            phase: self.phase(),
            result: self.result,
            running: self.running,
            level: self.level.index,
            weight_ceiling: self.level.weight_ceiling,
            remaining_time: self.remaining_time(),
            avatar_pos: self.avatar.pos,
            avatar_weight: self.avatar.weight,
            avatar_size: self.avatar.size,
            objects: self
                .objects
                .iter()
                .map(|obj| ObjectView {
                    id: obj.id,
                    pos: obj.pos,
                    size: obj.size,
                })
                .collect(),
            points_on_win: self.points_awarded_on_win(),
            games_played: self.progress.games_played,
            highest_level: self.progress.highest_level,
        }
    }
}
