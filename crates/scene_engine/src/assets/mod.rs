//! Visual asset production
//!
//! Asset import is an external collaborator: implementations of
//! [`VisualLoader`] produce ready-made [`Visual`] drawables, and a load
//! failure is returned to the requesting caller without disturbing entities
//! that are already running. Procedural constructors for simple shapes ship
//! here so consumers and tests need no loader at all.

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::physics::Aabb;
use crate::render::Color;
use crate::scene::graph::{ShapeKind, Visual};

/// Asset production failures, surfaced to the caller that requested the
/// load
#[derive(Error, Debug)]
pub enum AssetError {
    /// Reading the asset source failed
    #[error("asset io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source format is not supported by this loader
    #[error("unsupported asset format: {0}")]
    UnsupportedFormat(String),

    /// The source was read but could not be interpreted
    #[error("malformed asset `{path}`: {reason}")]
    Malformed {
        /// The offending source
        path: String,
        /// What went wrong
        reason: String,
    },
}

/// External loader seam producing ready-made drawables
pub trait VisualLoader {
    /// Produce a visual from the given source descriptor
    fn load(&mut self, source: &str) -> Result<Visual, AssetError>;
}

/// Create a box drawable with the given half-extents
pub fn cuboid(half_extents: Vec3, color: Color) -> Visual {
    Visual {
        local_bounds: Aabb::from_half_extents(Vec3::zeros(), half_extents),
        shape: ShapeKind::Cuboid,
        color,
    }
}

/// Create a unit cube drawable (half-extent 0.5 on every axis)
pub fn unit_cube(color: Color) -> Visual {
    cuboid(Vec3::new(0.5, 0.5, 0.5), color)
}

/// Create a sphere drawable with the given radius
pub fn sphere(radius: f32, color: Color) -> Visual {
    Visual {
        local_bounds: Aabb::from_half_extents(Vec3::zeros(), Vec3::new(radius, radius, radius)),
        shape: ShapeKind::Sphere,
        color,
    }
}
