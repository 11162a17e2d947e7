//! Collision primitives for the arena
//!
//! Everything in the arena collides as either a sphere (projectiles, tanks,
//! pickups) or an axis-aligned box (walls, buildings, the boss hull).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given half extents, resting on the ground plane
    pub fn grounded(half_x: f32, height: f32, half_z: f32) -> Self {
        Self {
            min: Vec3::new(-half_x, 0.0, -half_z),
            max: Vec3::new(half_x, height, half_z),
        }
    }

    /// This box moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closest point inside the box to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Box-sphere overlap (touching counts)
    #[inline]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }
}

/// Sphere-sphere overlap (touching counts)
#[inline]
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    let r = radius_a + radius_b;
    a.distance_squared(b) <= r * r
}
