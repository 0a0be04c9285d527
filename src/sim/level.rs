//! Per-level tunables derived from the level index

use serde::{Deserialize, Serialize};

use crate::tuning::LevelTuning;

/// Immutable difficulty settings for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// 1-based level index
    pub index: u32,
    /// Reaching this weight loses the level
    pub weight_ceiling: u32,
    /// Time to survive (time-units)
    pub survival_duration: f32,
    /// Time between spawns (time-units)
    pub spawn_interval: f32,
}

impl LevelSpec {
    /// Derive a level with the default difficulty curve.
    /// An index of 0 is treated as level 1.
    pub fn derive(index: u32) -> Self {
        Self::derive_with(index, &LevelTuning::default())
    }

    /// ceiling = max(floor, base - (n-1) * step)
    /// interval = max(floor, base - (n-1) * step)
    pub fn derive_with(index: u32, tuning: &LevelTuning) -> Self {
        let index = index.max(1);
        let steps = index - 1;

        let weight_ceiling = tuning
            .ceiling_base
            .saturating_sub(steps.saturating_mul(tuning.ceiling_step))
            .max(tuning.ceiling_floor);
        let spawn_interval =
            (tuning.spawn_base - steps as f32 * tuning.spawn_step).max(tuning.spawn_floor);

        Self {
            index,
            weight_ceiling,
            survival_duration: tuning.survival_duration,
            spawn_interval,
        }
    }

    /// Fall speed of objects spawned on this level
    pub fn object_velocity(&self, tuning: &LevelTuning) -> f32 {
        tuning.velocity_base + tuning.velocity_per_level * self.index as f32
    }

    pub fn next(&self, tuning: &LevelTuning) -> Self {
        Self::derive_with(self.index.saturating_add(1), tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one() {
        let level = LevelSpec::derive(1);
        assert_eq!(level.weight_ceiling, 200);
        assert!((level.spawn_interval - 1.0).abs() < 1e-6);
        assert_eq!(level.survival_duration, 60.0);
        assert_eq!(level.object_velocity(&LevelTuning::default()), 120.0);
    }

    #[test]
    fn test_level_two_ceiling() {
        assert_eq!(LevelSpec::derive(2).weight_ceiling, 180);
        assert!((LevelSpec::derive(2).spawn_interval - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_floors_reached() {
        assert_eq!(LevelSpec::derive(6).weight_ceiling, 100);
        assert_eq!(LevelSpec::derive(50).weight_ceiling, 100);
        assert!((LevelSpec::derive(8).spawn_interval - 0.3).abs() < 1e-6);
        assert_eq!(LevelSpec::derive(40).spawn_interval, 0.3);
    }

    #[test]
    fn test_zero_index_clamped() {
        assert_eq!(LevelSpec::derive(0), LevelSpec::derive(1));
    }

    #[test]
    fn test_next_increments_index() {
        let tuning = LevelTuning::default();
        let next = LevelSpec::derive(3).next(&tuning);
        assert_eq!(next.index, 4);
        assert_eq!(next.weight_ceiling, 140);
    }

    proptest! {
        #[test]
        fn prop_formulas_hold(n in 1u32..10_000) {
            let level = LevelSpec::derive(n);
            let expected_ceiling = (200i64 - 20 * (n as i64 - 1)).max(100) as u32;
            let expected_interval = (1.0f32 - 0.1 * (n - 1) as f32).max(0.3);
            prop_assert_eq!(level.weight_ceiling, expected_ceiling);
            prop_assert!((level.spawn_interval - expected_interval).abs() < 1e-5);
        }

        #[test]
        fn prop_non_increasing(n in 1u32..10_000) {
            let a = LevelSpec::derive(n);
            let b = LevelSpec::derive(n + 1);
            prop_assert!(b.weight_ceiling <= a.weight_ceiling);
            prop_assert!(b.spawn_interval <= a.spawn_interval);
            prop_assert!(b.weight_ceiling >= 100);
            prop_assert!(b.spawn_interval >= 0.3);
        }
    }
}
