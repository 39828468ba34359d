//! Entity ownership and hook dispatch
//!
//! The [`EntityRegistry`] is the exclusive authority over the set of live
//! entities and over structural mutation of the scene graph: adding an
//! entity attaches its visual, removing it detaches it, and nothing else in
//! the engine touches the graph's node set.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::input::InputState;
use crate::physics::{Aabb, CollisionPair};
use crate::scene::entity::Entity;
use crate::scene::graph::SceneGraph;

new_key_type! {
    /// Stable key of an entity in the registry arena
    pub struct EntityKey;
}

/// Errors raised by registry mutation
#[derive(Error, Debug)]
pub enum SceneError {
    /// An entity with this id is already registered; the registry is
    /// unchanged
    #[error("duplicate entity id: {id}")]
    DuplicateId {
        /// The rejected id
        id: String,
    },

    /// The entity's visual is already attached to a scene.
    ///
    /// Cannot occur through the public API; registered entities are owned
    /// by their registry and cannot be added a second time.
    #[error("entity `{id}` is already attached to a scene")]
    AlreadyAttached {
        /// The offending id
        id: String,
    },
}

/// Owns all live entities and the scene graph their visuals live in.
///
/// Entities are stored in an arena and looked up by their caller-supplied
/// id; iteration follows insertion order so hook dispatch is deterministic.
#[derive(Default)]
pub struct EntityRegistry {
    entities: SlotMap<EntityKey, Entity>,
    ids: HashMap<String, EntityKey>,
    order: Vec<EntityKey>,
    scene: SceneGraph,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, attaching its visual to the live scene.
    ///
    /// The entity's initial transform is copied onto the new scene node.
    /// Fails with [`SceneError::DuplicateId`] if the id is already present;
    /// the registry and scene are left unchanged in that case.
    pub fn add(&mut self, mut entity: Entity) -> Result<(), SceneError> {
        if self.ids.contains_key(entity.id()) {
            return Err(SceneError::DuplicateId {
                id: entity.id().to_owned(),
            });
        }
        let visual = entity.take_visual().ok_or_else(|| SceneError::AlreadyAttached {
            id: entity.id().to_owned(),
        })?;

        let node = self.scene.attach(visual, entity.transform.clone());
        entity.set_node(Some(node));

        let id = entity.id().to_owned();
        let key = self.entities.insert(entity);
        self.ids.insert(id, key);
        self.order.push(key);
        Ok(())
    }

    /// Remove an entity, detaching its visual from the scene.
    ///
    /// A no-op when the id is absent, so removal is safe to call from any
    /// path even if the entity is already gone.
    pub fn remove(&mut self, id: &str) {
        let Some(key) = self.ids.remove(id) else {
            return;
        };
        if let Some(entity) = self.entities.remove(key) {
            if let Some(node) = entity.node() {
                self.scene.detach(node);
            }
        }
        self.order.retain(|k| *k != key);
    }

    /// Look up an entity by id
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.ids.get(id).and_then(|key| self.entities.get(*key))
    }

    /// Look up an entity mutably by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        let key = *self.ids.get(id)?;
        self.entities.get_mut(key)
    }

    /// Whether an entity with this id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|key| self.entities.get(*key))
    }

    /// The live scene graph consumed by the renderer
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub(crate) fn key_of(&self, id: &str) -> Option<EntityKey> {
        self.ids.get(id).copied()
    }

    /// Visit every entity mutably in insertion order
    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(&mut Entity)) {
        for index in 0..self.order.len() {
            let key = self.order[index];
            if let Some(entity) = self.entities.get_mut(key) {
                f(entity);
            }
        }
    }

    /// Invoke every entity's update hook in insertion order.
    ///
    /// A failing hook is logged and skipped; the remaining entities still
    /// run (partial-failure isolation).
    pub(crate) fn run_updates(&mut self, input: &InputState, delta_time: f32) {
        for index in 0..self.order.len() {
            let key = self.order[index];
            let Some(entity) = self.entities.get_mut(key) else {
                continue;
            };
            let Some(mut behavior) = entity.take_behavior() else {
                continue;
            };
            let result = behavior.update(&mut entity.ctx(input), delta_time);
            if let Err(err) = result {
                log::warn!("update hook failed for entity `{}`: {err}", entity.id());
            }
            entity.restore_behavior(behavior);
        }
    }

    /// Dispatch collision hooks for every overlapping pair, both directions.
    ///
    /// Each entity in a pair receives exactly one `on_collision` call with
    /// the other as argument.
    pub(crate) fn dispatch_collisions(&mut self, pairs: &[CollisionPair], input: &InputState) {
        for pair in pairs {
            self.dispatch_collision(pair.first, pair.second, input);
            self.dispatch_collision(pair.second, pair.first, input);
        }
    }

    fn dispatch_collision(&mut self, target: EntityKey, other: EntityKey, input: &InputState) {
        let Some([target, other]) = self.entities.get_disjoint_mut([target, other]) else {
            return;
        };
        let Some(mut behavior) = target.take_behavior() else {
            return;
        };
        let result = behavior.on_collision(&mut target.ctx(input), &other.view());
        if let Err(err) = result {
            log::warn!("collision hook failed for entity `{}`: {err}", target.id());
        }
        target.restore_behavior(behavior);
    }

    /// Compute a fresh world-space bounding box for every entity.
    ///
    /// Recomputed from the visual's geometry bounds and the entity's
    /// current transform on every call; nothing is cached across ticks.
    pub(crate) fn collect_world_bounds(&self, out: &mut Vec<(EntityKey, Aabb)>) {
        out.clear();
        for &key in &self.order {
            let Some(entity) = self.entities.get(key) else {
                continue;
            };
            let Some(node_key) = entity.node() else {
                continue;
            };
            let Some(node) = self.scene.node(node_key) else {
                continue;
            };
            out.push((key, node.visual.local_bounds.transformed(&entity.transform)));
        }
    }

    /// Copy every entity's canonical transform onto its scene node.
    ///
    /// The sync is one-directional; nothing ever writes a node transform
    /// back onto an entity.
    pub(crate) fn sync_visuals(&mut self) {
        for entity in self.entities.values() {
            if let Some(node) = entity.node() {
                self.scene.set_transform(node, entity.transform.clone());
            }
        }
    }

    /// Detach and release every entity and scene node
    pub(crate) fn dispose(&mut self) {
        self.entities.clear();
        self.ids.clear();
        self.order.clear();
        self.scene.clear();
    }
}
