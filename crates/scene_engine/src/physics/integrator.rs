//! Physics integration
//!
//! Semi-implicit (symplectic) Euler: within one step the velocity update
//! from gravity happens before the position update, so the position moves
//! with the already-accelerated velocity.

use crate::foundation::math::Vec3;
use crate::scene::entity::Entity;
use crate::scene::registry::EntityRegistry;

/// Advances velocity and position for entities that opt into physics.
///
/// An entity opts in by carrying a velocity; entities without one are never
/// touched. There is no sub-stepping and no swept collision test: at a
/// large `delta_time` or a high velocity an entity can pass through a thin
/// collider in a single step. That trade-off is intentional and covered by
/// a regression test rather than corrected.
pub struct PhysicsIntegrator {
    gravity: f32,
}

impl PhysicsIntegrator {
    /// Create an integrator with the given downward gravity in units per
    /// second squared
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// The configured gravity
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Advance one entity by one step
    pub fn integrate(&self, entity: &mut Entity, delta_time: f32) {
        let Some(velocity) = entity.velocity.as_mut() else {
            return;
        };
        velocity.y -= self.gravity * delta_time;
        entity.transform.position += *velocity * delta_time;
    }

    /// Advance every physics-enabled entity in the registry by one step
    pub(crate) fn step(&self, registry: &mut EntityRegistry, delta_time: f32) {
        registry.for_each_mut(|entity| self.integrate(entity, delta_time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Aabb;
    use crate::render::Color;
    use crate::scene::graph::{ShapeKind, Visual};
    use approx::assert_relative_eq;

    fn test_visual() -> Visual {
        Visual {
            local_bounds: Aabb::from_half_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5)),
            shape: ShapeKind::Cuboid,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_gravity_accumulates_over_fixed_steps() {
        let gravity = 9.81;
        let dt = 1.0 / 60.0;
        let steps = 120;

        let integrator = PhysicsIntegrator::new(gravity);
        let mut entity = Entity::new("ball", test_visual()).with_velocity(Vec3::zeros());

        for _ in 0..steps {
            integrator.integrate(&mut entity, dt);
        }

        let velocity = entity.velocity.unwrap();
        assert_relative_eq!(velocity.y, -gravity * dt * steps as f32, epsilon = 1e-3);
    }

    #[test]
    fn test_position_non_increasing_once_falling() {
        let integrator = PhysicsIntegrator::new(9.81);
        let mut entity = Entity::new("ball", test_visual()).with_velocity(Vec3::zeros());

        let mut last_y = entity.transform.position.y;
        for _ in 0..60 {
            integrator.integrate(&mut entity, 1.0 / 60.0);
            let y = entity.transform.position.y;
            assert!(y <= last_y, "position rose while falling: {y} > {last_y}");
            last_y = y;
        }
    }

    #[test]
    fn test_velocity_updates_before_position() {
        // Symplectic Euler: after one step from rest, the position already
        // reflects the new velocity (-g*dt*dt), not the old zero velocity.
        let gravity = 10.0;
        let dt = 0.5;

        let integrator = PhysicsIntegrator::new(gravity);
        let mut entity = Entity::new("ball", test_visual()).with_velocity(Vec3::zeros());
        integrator.integrate(&mut entity, dt);

        assert_relative_eq!(
            entity.transform.position.y,
            -gravity * dt * dt,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_entity_without_velocity_is_untouched() {
        let integrator = PhysicsIntegrator::new(9.81);
        let mut entity = Entity::new("wall", test_visual());

        integrator.integrate(&mut entity, 1.0);
        assert_eq!(entity.transform.position, Vec3::zeros());
        assert!(entity.velocity.is_none());
    }

    #[test]
    fn test_horizontal_velocity_preserved() {
        let integrator = PhysicsIntegrator::new(9.81);
        let mut entity =
            Entity::new("ball", test_visual()).with_velocity(Vec3::new(2.0, 0.0, -1.0));

        integrator.integrate(&mut entity, 0.25);
        let velocity = entity.velocity.unwrap();
        assert_relative_eq!(velocity.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(velocity.z, -1.0, epsilon = 1e-6);
    }
}
