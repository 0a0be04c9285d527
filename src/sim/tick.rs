//! Per-frame simulation steps
//!
//! Free functions the engine composes into a frame: spawning, falling,
//! pruning objects that left the field, and the idle-mode autopilot.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::level::LevelSpec;
use super::state::{Avatar, FallingObject, FieldSize};
use crate::consts::SPAWN_Y;
use crate::tuning::Tuning;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Where the player wants the avatar (from drag/touch position)
    pub target: Option<Vec2>,
    /// Idle/demo mode - autopilot steers the avatar
    pub idle_mode: bool,
}

/// Build a new object above the visible field
pub fn spawn_object(
    rng: &mut Pcg32,
    id: u32,
    field: &FieldSize,
    level: &LevelSpec,
    tuning: &Tuning,
) -> FallingObject {
    let lo = tuning.spawn_margin;
    let hi = field.width - tuning.spawn_margin;
    let x = if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        field.width / 2.0
    };

    let payload = rng.random_range(tuning.payload_min..=tuning.payload_max);
    let size = rng.random_range(tuning.object_size_min..=tuning.object_size_max);

    FallingObject {
        id,
        pos: Vec2::new(x, SPAWN_Y),
        velocity: level.object_velocity(&tuning.levels),
        payload,
        size,
    }
}

/// Move every object down by one timestep
pub fn advance_objects(objects: &mut [FallingObject], dt: f32) {
    for obj in objects.iter_mut() {
        obj.fall(dt);
    }
}

/// Drop objects strictly below `field_height + margin`. Returns how many were removed.
pub fn prune_offscreen(objects: &mut Vec<FallingObject>, field_height: f32, margin: f32) -> usize {
    let limit = field_height + margin;
    let before = objects.len();
    objects.retain(|obj| obj.pos.y <= limit);
    before - objects.len()
}

/// Pick a dodge target for demo mode.
///
/// Finds the lowest object still above the avatar that would hit it if the
/// avatar stayed put, and sidesteps toward the roomier side. With nothing
/// threatening, drifts back toward the horizontal center.
pub fn autopilot_target(avatar: &Avatar, objects: &[FallingObject], field: &FieldSize) -> Vec2 {
    let threat = objects
        .iter()
        .filter(|obj| obj.pos.y < avatar.pos.y + avatar.radius())
        .filter(|obj| (obj.pos.x - avatar.pos.x).abs() < avatar.radius() + obj.radius() + 8.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let x = match threat {
        Some(obj) => {
            let clearance = avatar.radius() + obj.radius() + 12.0;
            let room_left = obj.pos.x;
            let room_right = field.width - obj.pos.x;
            if room_left > room_right {
                obj.pos.x - clearance
            } else {
                obj.pos.x + clearance
            }
        }
        None => avatar.pos.x + (field.width / 2.0 - avatar.pos.x) * 0.05,
    };

    Vec2::new(x, avatar.pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;

    fn object_at(id: u32, x: f32, y: f32) -> FallingObject {
        FallingObject {
            id,
            pos: Vec2::new(x, y),
            velocity: 120.0,
            payload: 10,
            size: 40.0,
        }
    }

    #[test]
    fn test_spawn_respects_ranges() {
        let tuning = Tuning::default();
        let field = FieldSize::new(375.0, 667.0).unwrap();
        let level = LevelSpec::derive(3);
        let mut rng = RngState::new(7).to_rng();

        for id in 1..200 {
            let obj = spawn_object(&mut rng, id, &field, &level, &tuning);
            assert_eq!(obj.id, id);
            assert_eq!(obj.pos.y, -50.0);
            assert!((50.0..=325.0).contains(&obj.pos.x));
            assert!((5..=15).contains(&obj.payload));
            assert!((15.0..=25.0).contains(&obj.radius()));
            assert_eq!(obj.velocity, 160.0);
        }
    }

    #[test]
    fn test_spawn_in_narrow_field_centers() {
        let tuning = Tuning::default();
        let field = FieldSize::new(80.0, 667.0).unwrap();
        let mut rng = RngState::new(1).to_rng();
        let obj = spawn_object(&mut rng, 1, &field, &LevelSpec::derive(1), &tuning);
        assert_eq!(obj.pos.x, 40.0);
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let tuning = Tuning::default();
        let field = FieldSize::default();
        let level = LevelSpec::derive(1);
        let mut a = RngState::new(99).to_rng();
        let mut b = RngState::new(99).to_rng();
        for id in 1..20 {
            assert_eq!(
                spawn_object(&mut a, id, &field, &level, &tuning),
                spawn_object(&mut b, id, &field, &level, &tuning)
            );
        }
    }

    #[test]
    fn test_prune_boundary_is_strict() {
        let mut objects = vec![
            object_at(1, 100.0, 717.0),
            object_at(2, 100.0, 717.0001),
            object_at(3, 100.0, 300.0),
        ];
        let removed = prune_offscreen(&mut objects, 667.0, 50.0);
        assert_eq!(removed, 1);
        let ids: Vec<u32> = objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_advance_moves_all_objects() {
        let mut objects = vec![object_at(1, 10.0, 0.0), object_at(2, 20.0, 100.0)];
        advance_objects(&mut objects, 0.5);
        assert_eq!(objects[0].pos.y, 60.0);
        assert_eq!(objects[1].pos.y, 160.0);
    }

    #[test]
    fn test_autopilot_sidesteps_threat() {
        let field = FieldSize::default();
        let avatar = Avatar::spawn(&field, 70, 60.0);
        let objects = vec![object_at(1, avatar.pos.x + 5.0, 300.0)];

        let target = autopilot_target(&avatar, &objects, &field);
        assert!((target.x - objects[0].pos.x).abs() >= avatar.radius() + objects[0].radius());
        assert_eq!(target.y, avatar.pos.y);
    }

    #[test]
    fn test_autopilot_ignores_objects_below() {
        let field = FieldSize::default();
        let mut avatar = Avatar::spawn(&field, 70, 60.0);
        avatar.pos.x = 100.0;
        let objects = vec![object_at(1, 100.0, avatar.pos.y + 80.0)];

        let target = autopilot_target(&avatar, &objects, &field);
        assert!(target.x > 100.0 && target.x < field.width / 2.0);
    }
}
