//! Avatar vs. falling object collision
//!
//! Circle-circle overlap on bounding radii. At most one object is consumed per
//! physics tick: the first overlapping object in stored (spawn) order wins,
//! not the closest one.

use glam::Vec2;

use super::state::{Avatar, FallingObject};

/// An object consumed by the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub object_id: u32,
    pub payload: u32,
}

/// Strict overlap test: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Index of the first object overlapping the avatar, in stored order
pub fn first_overlap(avatar: &Avatar, objects: &[FallingObject]) -> Option<usize> {
    objects
        .iter()
        .position(|obj| circles_overlap(avatar.pos, avatar.radius(), obj.pos, obj.radius()))
}

/// Consume the first overlapping object, if any.
///
/// The object is removed (order of the rest preserved) and its payload is
/// added to the avatar. With no overlap nothing changes.
pub fn resolve(avatar: &mut Avatar, objects: &mut Vec<FallingObject>) -> Option<Collision> {
    let index = first_overlap(avatar, objects)?;
    let obj = objects.remove(index);
    avatar.add_weight(obj.payload);
    Some(Collision {
        object_id: obj.id,
        payload: obj.payload,
    })
}
