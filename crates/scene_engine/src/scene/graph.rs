//! The live scene graph consumed by the renderer
//!
//! Drawable nodes live in an arena keyed by [`NodeKey`]; entities refer to
//! their node by key instead of holding an owning reference, so there are
//! no ownership cycles between the scene and the registry. Structural
//! mutation (attach/detach) goes through the [`EntityRegistry`](crate::scene::EntityRegistry)
//! exclusively.

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Transform;
use crate::physics::Aabb;
use crate::render::Color;

new_key_type! {
    /// Stable key of a drawable node in the scene graph
    pub struct NodeKey;
}

/// Geometry class of a drawable, consumed by renderer implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Box geometry filling the local bounds
    Cuboid,
    /// Sphere geometry inscribed in the local bounds
    Sphere,
}

/// A renderer-owned drawable description.
///
/// Carries the object-space geometry bounds the collision detector works
/// from and the appearance data the renderer consumes. Produced by the
/// asset layer (see [`crate::assets`]).
#[derive(Debug, Clone)]
pub struct Visual {
    /// Object-space bounds of the geometry
    pub local_bounds: Aabb,
    /// Geometry class
    pub shape: ShapeKind,
    /// Surface color
    pub color: Color,
}

/// A drawable node attached to the live scene
#[derive(Debug, Clone)]
pub struct VisualNode {
    /// The drawable description
    pub visual: Visual,
    /// World transform, copied from the owning entity every tick
    pub world_transform: Transform,
}

/// Arena of drawable nodes making up the live scene
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, VisualNode>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by key
    pub fn node(&self, key: NodeKey) -> Option<&VisualNode> {
        self.nodes.get(key)
    }

    /// Iterate over all attached nodes
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &VisualNode)> {
        self.nodes.iter()
    }

    pub(crate) fn attach(&mut self, visual: Visual, world_transform: Transform) -> NodeKey {
        self.nodes.insert(VisualNode {
            visual,
            world_transform,
        })
    }

    pub(crate) fn detach(&mut self, key: NodeKey) {
        self.nodes.remove(key);
    }

    pub(crate) fn set_transform(&mut self, key: NodeKey, world_transform: Transform) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.world_transform = world_transform;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}
