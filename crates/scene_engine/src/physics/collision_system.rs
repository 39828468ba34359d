//! Collision detection over the live entity set
//!
//! Pure detection: the detector computes overlapping pairs and leaves hook
//! dispatch to the registry, which owns mutable entity access. Every tick
//! recomputes every bounding box from scratch; transforms may have changed
//! in physics or update hooks, so nothing is cached across ticks.
//!
//! The pair test is quadratic in entity count. There is deliberately no
//! spatial partitioning, which bounds the design to small-to-moderate
//! scenes (tens to low hundreds of entities).

use crate::physics::Aabb;
use crate::scene::registry::{EntityKey, EntityRegistry};

/// An unordered pair of entities whose bounds overlap this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// The smaller entity key
    pub first: EntityKey,
    /// The larger entity key
    pub second: EntityKey,
}

impl CollisionPair {
    /// Create a pair in canonical order so `(a, b)` and `(b, a)` compare
    /// equal
    pub fn new(a: EntityKey, b: EntityKey) -> Self {
        if a < b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Computes fresh bounding volumes and overlapping pairs each tick
#[derive(Default)]
pub struct CollisionDetector {
    bounds: Vec<(EntityKey, Aabb)>,
    pairs: Vec<CollisionPair>,
}

impl CollisionDetector {
    /// Create a new detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of overlapping pairs found by the last detection pass
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Recompute all bounds and return the overlapping pairs.
    ///
    /// Tests every unordered pair `(i, j)` with `i < j` exactly once.
    pub(crate) fn detect(&mut self, registry: &EntityRegistry) -> &[CollisionPair] {
        registry.collect_world_bounds(&mut self.bounds);
        self.pairs.clear();

        for i in 0..self.bounds.len() {
            let (key_a, aabb_a) = self.bounds[i];
            for &(key_b, aabb_b) in &self.bounds[i + 1..] {
                if aabb_a.intersects(&aabb_b) {
                    self.pairs.push(CollisionPair::new(key_a, key_b));
                }
            }
        }
        &self.pairs
    }
}
