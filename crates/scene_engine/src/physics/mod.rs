//! Physics integration and collision detection

pub mod collision;
pub mod collision_system;
pub mod integrator;

pub use collision::Aabb;
pub use collision_system::{CollisionDetector, CollisionPair};
pub use integrator::PhysicsIntegrator;
