//! Axis-aligned bounding boxes and overlap testing

use crate::foundation::math::{Transform, Vec3};

/// An axis-aligned bounding box for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corner points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from a center point and half-extents along each axis
    pub fn from_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this box overlaps another.
    ///
    /// Boxes that merely touch on a face count as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Check if a point lies inside the box (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Compute the world-space enclosure of this box under a transform.
    ///
    /// Treats the box as object-space geometry bounds: scale and rotate the
    /// extents, then translate. Rotating an oriented box and re-enclosing it
    /// axis-aligned grows the result; the enclosing half-extents are
    /// `|R| * (half_extents * scale)`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let scaled_center = self.center().component_mul(&transform.scale);
        let scaled_half = self.half_extents().component_mul(&transform.scale);

        let rotation = transform.rotation.to_rotation_matrix();
        let world_center = rotation * scaled_center + transform.position;
        let world_half = rotation.matrix().abs() * scaled_half;

        Self::from_half_extents(world_center, world_half)
    }
}
