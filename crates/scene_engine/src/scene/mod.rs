//! Scene management: entities, the registry that owns them, and the
//! renderer-facing scene graph

pub mod entity;
pub mod graph;
pub mod registry;

pub use entity::{Behavior, Entity, EntityCtx, EntityView, HookError, PropertyMap};
pub use graph::{NodeKey, SceneGraph, ShapeKind, Visual, VisualNode};
pub use registry::{EntityKey, EntityRegistry, SceneError};
