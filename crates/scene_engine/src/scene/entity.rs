//! Entities and their consumer-attached behavior
//!
//! An [`Entity`] is the engine's unit of simulated, drawable, and collidable
//! state: a caller-supplied id, a canonical transform owned by the engine,
//! an optional velocity that opts it into physics, a typed property bag, and
//! optional per-frame hooks attached through the [`Behavior`] trait.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use thiserror::Error;

use crate::foundation::math::{Transform, Vec3};
use crate::input::InputState;
use crate::scene::graph::{NodeKey, Visual};

/// Error returned by a failing behavior hook.
///
/// A hook failure never halts the tick: it is logged at the dispatch site
/// and the remaining entities are processed normally.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct HookError(String);

impl HookError {
    /// Create a hook error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

/// Mutable view of an entity handed to its own hooks
pub struct EntityCtx<'a> {
    /// The entity's unique id
    pub id: &'a str,
    /// The entity's display name
    pub name: &'a str,
    /// Canonical transform, mutable from hooks
    pub transform: &'a mut Transform,
    /// Velocity; `Some` opts the entity into physics integration
    pub velocity: &'a mut Option<Vec3>,
    /// Consumer-owned property bag
    pub properties: &'a mut PropertyMap,
    /// Snapshot of the injected input source for this tick
    pub input: &'a InputState,
}

/// Read-only view of a collision partner
pub struct EntityView<'a> {
    /// The partner's unique id
    pub id: &'a str,
    /// The partner's display name
    pub name: &'a str,
    /// The partner's canonical transform
    pub transform: &'a Transform,
    /// The partner's velocity, if it carries one
    pub velocity: Option<Vec3>,
}

/// Per-entity simulation hooks.
///
/// Both hooks default to no-ops; consumers implement only what they need.
/// Returning an error aborts this entity's hook for the tick, nothing else.
pub trait Behavior {
    /// Called once per tick after physics integration
    fn update(&mut self, entity: &mut EntityCtx<'_>, delta_time: f32) -> Result<(), HookError> {
        let _ = (entity, delta_time);
        Ok(())
    }

    /// Called once per tick for every partner whose bounds overlap this
    /// entity's bounds
    fn on_collision(
        &mut self,
        entity: &mut EntityCtx<'_>,
        other: &EntityView<'_>,
    ) -> Result<(), HookError> {
        let _ = (entity, other);
        Ok(())
    }
}

/// Typed, extensible property bag.
///
/// Stores at most one value per Rust type; consumers define their own
/// marker types (for example an `OnGround(bool)` struct) and the engine
/// never looks inside.
#[derive(Default)]
pub struct PropertyMap {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl PropertyMap {
    /// Create an empty property bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value of the same type
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Get a value by type
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Get a mutable value by type
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Remove and return a value by type
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Whether a value of the given type is present
    pub fn contains<T: Any>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The unit the engine manages
pub struct Entity {
    id: String,
    /// Display label; no uniqueness constraint
    pub name: String,
    /// Canonical transform, owned by the engine and copied onto the visual
    /// every tick
    pub transform: Transform,
    /// Velocity in units per second; presence opts into physics integration
    pub velocity: Option<Vec3>,
    /// Consumer-owned property bag, opaque to the engine
    pub properties: PropertyMap,
    visual: Option<Visual>,
    node: Option<NodeKey>,
    behavior: Option<Box<dyn Behavior>>,
}

impl Entity {
    /// Create an entity with the given unique id and drawable.
    ///
    /// The name defaults to the id; uniqueness is enforced when the entity
    /// is added to a registry.
    pub fn new(id: impl Into<String>, visual: Visual) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            transform: Transform::identity(),
            velocity: None,
            properties: PropertyMap::new(),
            visual: Some(visual),
            node: None,
            behavior: None,
        }
    }

    /// Builder pattern: set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder pattern: set the initial transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: set the initial position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: set an initial velocity, opting into physics
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Builder pattern: attach a behavior
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Builder pattern: seed the property bag
    pub fn with_property<T: Any>(mut self, value: T) -> Self {
        self.properties.insert(value);
        self
    }

    /// The entity's unique id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the entity is attached to a live scene
    pub fn is_registered(&self) -> bool {
        self.node.is_some()
    }

    pub(crate) fn take_visual(&mut self) -> Option<Visual> {
        self.visual.take()
    }

    pub(crate) fn node(&self) -> Option<NodeKey> {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: Option<NodeKey>) {
        self.node = node;
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn Behavior>> {
        self.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behavior = Some(behavior);
    }

    pub(crate) fn ctx<'a>(&'a mut self, input: &'a InputState) -> EntityCtx<'a> {
        EntityCtx {
            id: &self.id,
            name: &self.name,
            transform: &mut self.transform,
            velocity: &mut self.velocity,
            properties: &mut self.properties,
            input,
        }
    }

    pub(crate) fn view(&self) -> EntityView<'_> {
        EntityView {
            id: &self.id,
            name: &self.name,
            transform: &self.transform,
            velocity: self.velocity,
        }
    }
}
