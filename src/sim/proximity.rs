//! Ground-plane proximity test
//!
//! Squared-distance comparison on XZ so the per-frame goal check never pays
//! for a square root. Height is ignored; goal zones are columns, not spheres.

use glam::Vec3;

/// True when `a` and `b` are within `trigger_distance` of each other on the
/// ground plane. Pure; callers derive the distance (goal radius × collection
/// threshold) themselves.
#[inline]
pub fn is_within(a: Vec3, b: Vec3, trigger_distance: f32) -> bool {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz <= trigger_distance * trigger_distance
}
