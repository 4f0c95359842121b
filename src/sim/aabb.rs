//! Axis-aligned bounding volumes
//!
//! Every collidable thing is modelled as a box in its own local frame, rotated
//! about the vertical axis and then wrapped in the tightest world-aligned box.
//! Collisions are only ever tested between these world boxes.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A world-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box from a center and half extents
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// World box around a local box that is yawed and then translated
    pub fn from_local(local: &LocalBox, position: Vec3, yaw: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw);
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in local.corners() {
            let p = position + rotation * corner;
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Overlap test; touching faces count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Overlap test on the ground plane only (x, z)
    #[inline]
    pub fn intersects_ground_rect(&self, rect: &GroundRect) -> bool {
        self.min.x <= rect.max.x
            && self.max.x >= rect.min.x
            && self.min.z <= rect.max.y
            && self.max.z >= rect.min.y
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// An oriented box described in an entity's own frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl LocalBox {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box standing on the local origin: centred in x/z, rising from y = 0
    pub fn grounded(width: f32, height: f32, depth: f32) -> Self {
        Self {
            min: Vec3::new(-width / 2.0, 0.0, -depth / 2.0),
            max: Vec3::new(width / 2.0, height, depth / 2.0),
        }
    }

    fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// Axis-aligned rectangle on the ground plane (`Vec2` is (x, z))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl GroundRect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    /// Grow uniformly by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Inclusive containment
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_intersects() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::from_center(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_from_local_unrotated() {
        let local = LocalBox::grounded(2.0, 1.0, 4.0);
        let aabb = Aabb::from_local(&local, Vec3::new(10.0, 0.5, 0.0), 0.0);
        assert!((aabb.min - Vec3::new(9.0, 0.5, -2.0)).length() < 1e-5);
        assert!((aabb.max - Vec3::new(11.0, 1.5, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_from_local_quarter_turn_swaps_extents() {
        let local = LocalBox::grounded(2.0, 1.0, 4.0);
        let aabb = Aabb::from_local(&local, Vec3::ZERO, FRAC_PI_2);
        let size = aabb.size();
        assert!((size.x - 4.0).abs() < 1e-4);
        assert!((size.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_local_diagonal_grows() {
        let local = LocalBox::grounded(2.0, 1.0, 2.0);
        let aabb = Aabb::from_local(&local, Vec3::ZERO, FRAC_PI_2 / 2.0);
        // A square turned 45 degrees spans its diagonal
        assert!((aabb.size().x - 2.0 * 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_ground_rect() {
        let rect = GroundRect::from_center(Vec2::new(0.0, 0.0), Vec2::new(4.0, 10.0));
        assert!(rect.contains(Vec2::new(2.0, 5.0)));
        assert!(!rect.contains(Vec2::new(2.1, 0.0)));
        assert!(rect.expanded(0.5).contains(Vec2::new(2.4, 5.4)));

        let aabb = Aabb::from_center(Vec3::new(3.0, 1.0, 0.0), Vec3::splat(1.5));
        assert!(aabb.intersects_ground_rect(&rect));
        let far = Aabb::from_center(Vec3::new(6.0, 1.0, 0.0), Vec3::splat(1.5));
        assert!(!far.intersects_ground_rect(&rect));
    }
}
