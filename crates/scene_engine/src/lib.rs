//! # Scene Engine
//!
//! A frame-driven simulation engine for scenes of movable entities:
//! physics integration, pairwise AABB collision detection, and
//! lifecycle-safe entity management, decoupled from rendering.
//!
//! ## Features
//!
//! - **Entity Registry**: id-keyed ownership of all live entities and their
//!   scene-graph visuals
//! - **Semi-Implicit Euler Physics**: gravity-driven integration for
//!   entities that opt in by carrying a velocity
//! - **AABB Collision Detection**: fresh bounds every tick, symmetric
//!   callback dispatch for every overlapping pair
//! - **Host-Cooperative Scheduling**: the engine registers frame requests
//!   with a pluggable scheduler and never runs its own thread
//! - **Opaque Rendering Seam**: drawing goes through a single fallible
//!   `draw` call on an injected renderer bridge
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::headless(EngineConfig::default());
//!
//!     let crate_visual = scene_engine::assets::unit_cube(Color::WHITE);
//!     engine.add_entity(
//!         Entity::new("crate-1", crate_visual)
//!             .with_position(Vec3::new(0.0, 10.0, 0.0))
//!             .with_velocity(Vec3::zeros()),
//!     )?;
//!
//!     engine.run_for(600)?;
//!     engine.dispose();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod scheduler;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError, EngineState, FrameObserver, TickStats};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Transform, Vec3},
            time::Clock,
        },
        input::{InputEvent, InputSource, InputState, KeyCode},
        physics::{Aabb, CollisionDetector, PhysicsIntegrator},
        render::{Color, FrameState, HeadlessRenderer, RenderError, RendererBridge},
        scene::{Behavior, Entity, EntityCtx, EntityView, HookError, PropertyMap, Visual},
        scheduler::{FrameScheduler, ManualScheduler, TimerScheduler},
        Engine, EngineConfig, EngineError, EngineState, TickStats,
    };
}
