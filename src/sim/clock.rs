//! Simulation clock
//!
//! One frame-driven loop drives three periodic actions (countdown, spawn,
//! physics). Periods are quantized to whole physics frames so all three stay
//! in lock-step and a frame always reports its due actions in a fixed order.
//! Each action can be armed and cancelled; re-arming starts a fresh schedule
//! with no catch-up for intervals missed while cancelled.

use serde::{Deserialize, Serialize};

use crate::period_to_frames;

/// A repeating action counted in physics frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicAction {
    period_frames: u32,
    frames_until_due: u32,
    armed: bool,
}

impl PeriodicAction {
    pub fn new(period_frames: u32) -> Self {
        let period_frames = period_frames.max(1);
        Self {
            period_frames,
            frames_until_due: period_frames,
            armed: false,
        }
    }

    /// Start a fresh schedule: first fire one full period from now
    pub fn arm(&mut self) {
        self.frames_until_due = self.period_frames;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_frames(&self) -> u32 {
        self.period_frames
    }

    /// Change the period; takes effect on the next `arm()`
    pub fn set_period(&mut self, period_frames: u32) {
        self.period_frames = period_frames.max(1);
    }

    /// Count down one frame. Returns true when the action fires.
    fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.frames_until_due -= 1;
        if self.frames_until_due == 0 {
            self.frames_until_due = self.period_frames;
            true
        } else {
            false
        }
    }
}

/// Actions due in a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueActions {
    pub spawn: bool,
    pub physics: bool,
    pub countdown: bool,
}

impl DueActions {
    pub fn any(&self) -> bool {
        self.spawn || self.physics || self.countdown
    }
}

/// Frame-quantized scheduler for the three periodic actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    tick_rate: u32,
    countdown: PeriodicAction,
    spawn: PeriodicAction,
    physics: PeriodicAction,
    /// Frames elapsed while armed
    frame: u64,
}

impl SimulationClock {
    pub fn new(tick_rate: u32, countdown_period: f32, spawn_interval: f32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            countdown: PeriodicAction::new(period_to_frames(countdown_period, tick_rate)),
            spawn: PeriodicAction::new(period_to_frames(spawn_interval, tick_rate)),
            physics: PeriodicAction::new(1),
            frame: 0,
        }
    }

    /// Fixed timestep of one physics frame
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn set_spawn_interval(&mut self, interval: f32) {
        self.spawn.set_period(period_to_frames(interval, self.tick_rate));
    }

    /// Arm all three actions with fresh schedules
    pub fn arm_all(&mut self) {
        self.countdown.arm();
        self.spawn.arm();
        self.physics.arm();
    }

    /// Cancel all three actions; nothing fires until the next `arm_all()`
    pub fn cancel_all(&mut self) {
        self.countdown.cancel();
        self.spawn.cancel();
        self.physics.cancel();
    }

    /// All three actions run or none do
    pub fn is_armed(&self) -> bool {
        self.physics.is_armed()
    }

    pub fn reset_frame(&mut self) {
        self.frame = 0;
    }

    pub fn countdown(&self) -> &PeriodicAction {
        &self.countdown
    }

    pub fn spawn(&self) -> &PeriodicAction {
        &self.spawn
    }

    /// Advance one physics frame and report which actions are due
    pub fn next_frame(&mut self) -> DueActions {
        if !self.is_armed() {
            return DueActions::default();
        }
        self.frame += 1;
        DueActions {
            spawn: self.spawn.tick(),
            physics: self.physics.tick(),
            countdown: self.countdown.tick(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> SimulationClock {
        SimulationClock::new(60, 0.1, 1.0)
    }

    #[test]
    fn test_unarmed_clock_fires_nothing() {
        let mut c = clock();
        for _ in 0..120 {
            assert!(!c.next_frame().any());
        }
        assert_eq!(c.frame(), 0);
    }

    #[test]
    fn test_periods_in_frames() {
        let mut c = clock();
        c.arm_all();
        let mut countdowns = 0;
        let mut spawns = 0;
        let mut physics = 0;
        for _ in 0..60 {
            let due = c.next_frame();
            countdowns += due.countdown as u32;
            spawns += due.spawn as u32;
            physics += due.physics as u32;
        }
        assert_eq!(physics, 60);
        assert_eq!(countdowns, 10);
        assert_eq!(spawns, 1);
    }

    #[test]
    fn test_first_fire_after_full_period() {
        let mut c = clock();
        c.arm_all();
        for _ in 0..5 {
            assert!(!c.next_frame().countdown);
        }
        assert!(c.next_frame().countdown);
    }

    #[test]
    fn test_rearm_discards_partial_progress() {
        let mut c = clock();
        c.arm_all();
        for _ in 0..4 {
            c.next_frame();
        }
        c.cancel_all();
        assert!(!c.next_frame().any());

        c.arm_all();
        for _ in 0..5 {
            assert!(!c.next_frame().countdown);
        }
        assert!(c.next_frame().countdown);
    }

    #[test]
    fn test_spawn_interval_change_applies_on_arm() {
        let mut c = clock();
        c.set_spawn_interval(0.3);
        assert_eq!(c.spawn().period_frames(), 18);
        c.arm_all();
        let fired: Vec<bool> = (0..18).map(|_| c.next_frame().spawn).collect();
        assert_eq!(fired.iter().filter(|f| **f).count(), 1);
        assert!(fired[17]);
    }
}
