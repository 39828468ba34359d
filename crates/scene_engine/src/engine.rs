//! Core engine implementation
//!
//! The engine coordinates all subsystems and sequences the tick: clock →
//! input → physics integration → entity update hooks → collision detection
//! and dispatch → transform sync → draw. A tick always runs to completion;
//! lifecycle transitions take effect at the next tick boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::foundation::time::Clock;
use crate::input::{InputEvent, InputSource, InputState};
use crate::physics::{CollisionDetector, PhysicsIntegrator};
use crate::render::{Color, FrameState, RenderError, RendererBridge};
use crate::scene::entity::Entity;
use crate::scene::registry::{EntityRegistry, SceneError};
use crate::scheduler::FrameScheduler;

/// Lifecycle state of an engine instance.
///
/// `Idle → Running` via `start`; `Running ↔ Paused` via `pause`/`resume`;
/// `Running`/`Paused → Idle` via `stop` (restartable); any state →
/// `Disposed` via `dispose` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed or stopped; not ticking
    Idle,
    /// Simulating and drawing
    Running,
    /// Drawing the last simulated frame; the clock is frozen
    Paused,
    /// Torn down; every mutating or ticking operation fails
    Disposed,
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Registry mutation failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The operation is not allowed in the current lifecycle state
    #[error("`{operation}` called on a {state:?} engine")]
    InvalidState {
        /// The rejected operation
        operation: &'static str,
        /// The state the engine was in
        state: EngineState,
    },

    /// The renderer failed unrecoverably; the frame loop has stopped
    #[error("renderer failure: {0}")]
    Renderer(#[from] RenderError),
}

/// Engine construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Viewport width in pixels
    pub viewport_width: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,

    /// Clear color handed to the renderer each frame
    pub background_color: Color,

    /// Whether the physics integration step runs at all.
    ///
    /// When false, per-entity velocities are ignored entirely.
    pub enable_physics: bool,

    /// Downward gravity in units per second squared
    pub gravity: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 720,
            background_color: Color::rgb(0.1, 0.1, 0.12),
            enable_physics: true,
            gravity: 9.81,
        }
    }
}

impl Config for EngineConfig {}

/// Per-tick statistics snapshot
#[derive(Debug, Clone, Default)]
pub struct TickStats {
    /// Ticks simulated since `start`
    pub tick_count: u64,
    /// Total simulated time in seconds
    pub elapsed: f32,
    /// FPS implied by the last tick
    pub current_fps: f32,
    /// Average FPS since `start`
    pub average_fps: f32,
    /// Number of registered entities
    pub entity_count: usize,
    /// Overlapping pairs found by the last collision pass
    pub collision_pairs: usize,
}

/// Engine-level observer callback, fed the tick's delta time
pub type FrameObserver = Box<dyn FnMut(f32)>;

/// Main engine struct.
///
/// Owns the entity registry, the simulation subsystems, and the seams to
/// the host: a frame scheduler, a renderer bridge, and an optional input
/// source. Single-threaded and host-cooperative: the host grants frames,
/// the engine runs one tick per grant.
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    clock: Clock,
    scheduler: Box<dyn FrameScheduler>,
    registry: EntityRegistry,
    integrator: PhysicsIntegrator,
    detector: CollisionDetector,
    renderer: Box<dyn RendererBridge>,
    input_source: Option<Box<dyn InputSource>>,
    input: InputState,
    input_events: Vec<InputEvent>,
    on_update: Option<FrameObserver>,
    on_render: Option<FrameObserver>,
    last_pair_count: usize,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(
        config: EngineConfig,
        renderer: Box<dyn RendererBridge>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Self {
        log::info!(
            "initializing engine: {}x{} viewport, physics {}",
            config.viewport_width,
            config.viewport_height,
            if config.enable_physics { "on" } else { "off" }
        );
        let integrator = PhysicsIntegrator::new(config.gravity);
        Self {
            config,
            state: EngineState::Idle,
            clock: Clock::new(),
            scheduler,
            registry: EntityRegistry::new(),
            integrator,
            detector: CollisionDetector::new(),
            renderer,
            input_source: None,
            input: InputState::new(),
            input_events: Vec::new(),
            on_update: None,
            on_render: None,
            last_pair_count: 0,
        }
    }

    /// Create an engine with a no-op renderer and an immediate scheduler.
    ///
    /// Convenient for tests and headless simulation runs.
    pub fn headless(config: EngineConfig) -> Self {
        Self::new(
            config,
            Box::new(crate::render::HeadlessRenderer::new()),
            Box::new(crate::scheduler::ManualScheduler::new()),
        )
    }

    /// Inject an input source; it is dropped at `dispose`
    pub fn set_input_source(&mut self, source: Box<dyn InputSource>) {
        self.input_source = Some(source);
    }

    /// Set the observer called after simulation work each tick
    pub fn set_on_update(&mut self, observer: FrameObserver) {
        self.on_update = Some(observer);
    }

    /// Set the observer called after each successfully drawn frame
    pub fn set_on_render(&mut self, observer: FrameObserver) {
        self.on_render = Some(observer);
    }

    /// Begin requesting frames and simulating.
    ///
    /// Captures a fresh time baseline. A no-op when already running.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Disposed => Err(self.invalid("start")),
            EngineState::Running | EngineState::Paused => {
                log::debug!("start ignored; engine already running");
                Ok(())
            }
            EngineState::Idle => {
                log::info!("engine starting");
                self.clock.start();
                self.state = EngineState::Running;
                self.scheduler.request_tick();
                Ok(())
            }
        }
    }

    /// Cancel the pending frame request and return to idle.
    ///
    /// Restartable; calling `stop` when already idle is a no-op.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Disposed => Err(self.invalid("stop")),
            EngineState::Idle => Ok(()),
            EngineState::Running | EngineState::Paused => {
                log::info!("engine stopping");
                self.scheduler.cancel_tick();
                self.clock.stop();
                self.state = EngineState::Idle;
                Ok(())
            }
        }
    }

    /// Freeze the simulation without cancelling the frame request.
    ///
    /// Paused ticks keep drawing the last simulated frame but run no
    /// physics, hooks, or collision work.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Disposed => Err(self.invalid("pause")),
            EngineState::Paused | EngineState::Idle => Ok(()),
            EngineState::Running => {
                log::info!("engine paused");
                self.clock.stop();
                self.state = EngineState::Paused;
                Ok(())
            }
        }
    }

    /// Restart the clock after a pause.
    ///
    /// The paused interval is never reported as delta time.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Disposed => Err(self.invalid("resume")),
            EngineState::Running | EngineState::Idle => Ok(()),
            EngineState::Paused => {
                log::info!("engine resumed");
                self.clock.resume();
                self.state = EngineState::Running;
                Ok(())
            }
        }
    }

    /// Change the viewport dimensions
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if self.state == EngineState::Disposed {
            return Err(self.invalid("resize"));
        }
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.renderer.resize(width, height);
        Ok(())
    }

    /// Register an entity, attaching its visual to the live scene
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), EngineError> {
        if self.state == EngineState::Disposed {
            return Err(self.invalid("add_entity"));
        }
        self.registry.add(entity)?;
        Ok(())
    }

    /// Remove an entity by id; a no-op when the id is absent
    pub fn remove_entity(&mut self, id: &str) -> Result<(), EngineError> {
        if self.state == EngineState::Disposed {
            return Err(self.invalid("remove_entity"));
        }
        self.registry.remove(id);
        Ok(())
    }

    /// Look up an entity by id
    pub fn get_entity(&self, id: &str) -> Option<&Entity> {
        self.registry.get(id)
    }

    /// Look up an entity mutably by id
    pub fn get_entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.registry.get_mut(id)
    }

    /// Iterate over all registered entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.registry.iter()
    }

    /// The entity registry
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The input snapshot from the last poll
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// A statistics snapshot for the last tick
    pub fn stats(&self) -> TickStats {
        TickStats {
            tick_count: self.clock.tick_count(),
            elapsed: self.clock.elapsed(),
            current_fps: self.clock.current_fps(),
            average_fps: self.clock.average_fps(),
            entity_count: self.registry.len(),
            collision_pairs: self.last_pair_count,
        }
    }

    /// Run one tick.
    ///
    /// Called by the host whenever the scheduler grants a frame. Idle ticks
    /// are no-ops (a stop may have landed since the frame was requested);
    /// paused ticks only draw; a disposed engine rejects the call.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Disposed => return Err(self.invalid("tick")),
            EngineState::Idle => return Ok(()),
            EngineState::Paused => {
                self.draw()?;
                self.scheduler.request_tick();
                return Ok(());
            }
            EngineState::Running => {}
        }

        let delta_time = self.clock.tick();
        self.poll_input();

        // Total ordering: integration for all entities finishes before any
        // update hook runs, and all hooks finish before collision detection.
        if self.config.enable_physics {
            self.integrator.step(&mut self.registry, delta_time);
        }
        self.registry.run_updates(&self.input, delta_time);

        let pairs = self.detector.detect(&self.registry);
        self.last_pair_count = pairs.len();
        self.registry.dispatch_collisions(pairs, &self.input);

        if let Some(on_update) = self.on_update.as_mut() {
            on_update(delta_time);
        }

        self.registry.sync_visuals();
        self.draw()?;
        if let Some(on_render) = self.on_render.as_mut() {
            on_render(delta_time);
        }

        self.scheduler.request_tick();
        Ok(())
    }

    /// Drive the engine until the host stops granting frames.
    ///
    /// Starts the engine when idle and stops it cleanly when the scheduler
    /// reports host shutdown. Renderer failures abort the loop with the
    /// propagated error.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.state == EngineState::Idle {
            self.start()?;
        }
        while self.scheduler.tick_requested() {
            if !self.scheduler.next_frame() {
                break;
            }
            self.tick()?;
        }
        if matches!(self.state, EngineState::Running | EngineState::Paused) {
            self.stop()?;
        }
        Ok(())
    }

    /// Drive the engine for at most `frames` granted frames, then stop
    pub fn run_for(&mut self, frames: u64) -> Result<(), EngineError> {
        if self.state == EngineState::Idle {
            self.start()?;
        }
        for _ in 0..frames {
            if !self.scheduler.tick_requested() || !self.scheduler.next_frame() {
                break;
            }
            self.tick()?;
        }
        if matches!(self.state, EngineState::Running | EngineState::Paused) {
            self.stop()?;
        }
        Ok(())
    }

    /// Tear the instance down.
    ///
    /// Cancels the pending frame request, detaches and releases every
    /// entity's visual, releases renderer-owned resources, and drops the
    /// injected input source. Terminal: the instance is not reusable, and
    /// every later mutating or ticking call fails with
    /// [`EngineError::InvalidState`]. Disposing twice is a no-op.
    pub fn dispose(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        log::info!("disposing engine");
        self.scheduler.cancel_tick();
        self.clock.stop();
        self.registry.dispose();
        self.renderer.release();
        self.input_source = None;
        self.on_update = None;
        self.on_render = None;
        self.state = EngineState::Disposed;
    }

    fn invalid(&self, operation: &'static str) -> EngineError {
        EngineError::InvalidState {
            operation,
            state: self.state,
        }
    }

    fn poll_input(&mut self) {
        let Some(source) = self.input_source.as_mut() else {
            return;
        };
        self.input_events.clear();
        source.poll(&mut self.input_events);
        for event in self.input_events.drain(..) {
            self.input.apply(event);
        }
    }

    fn draw(&mut self) -> Result<(), EngineError> {
        let frame = FrameState {
            scene: self.registry.scene(),
            viewport: (self.config.viewport_width, self.config.viewport_height),
            background: self.config.background_color,
            elapsed: self.clock.elapsed(),
            tick: self.clock.tick_count(),
        };
        if let Err(err) = self.renderer.draw(&frame) {
            log::error!("renderer failed, stopping loop: {err}");
            self.scheduler.cancel_tick();
            self.clock.stop();
            self.state = EngineState::Idle;
            return Err(EngineError::Renderer(err));
        }
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::unit_cube;
    use crate::foundation::math::Vec3;
    use crate::scene::entity::{Behavior, EntityCtx, EntityView, HookError};
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread::sleep;
    use std::time::Duration;

    struct RecordCollisions {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Behavior for RecordCollisions {
        fn on_collision(
            &mut self,
            _entity: &mut EntityCtx<'_>,
            other: &EntityView<'_>,
        ) -> Result<(), HookError> {
            self.seen.borrow_mut().push(other.id.to_owned());
            Ok(())
        }
    }

    struct CountUpdates {
        count: Rc<RefCell<u32>>,
    }

    impl Behavior for CountUpdates {
        fn update(&mut self, _entity: &mut EntityCtx<'_>, _dt: f32) -> Result<(), HookError> {
            *self.count.borrow_mut() += 1;
            Ok(())
        }
    }

    struct CountingRenderer {
        frames: Rc<RefCell<u64>>,
        released: Rc<RefCell<bool>>,
    }

    impl RendererBridge for CountingRenderer {
        fn draw(&mut self, _frame: &FrameState<'_>) -> Result<(), RenderError> {
            *self.frames.borrow_mut() += 1;
            Ok(())
        }

        fn release(&mut self) {
            *self.released.borrow_mut() = true;
        }
    }

    struct FailingRenderer;

    impl RendererBridge for FailingRenderer {
        fn draw(&mut self, _frame: &FrameState<'_>) -> Result<(), RenderError> {
            Err(RenderError::ContextLost("device gone".to_owned()))
        }
    }

    fn headless_engine() -> Engine {
        Engine::headless(EngineConfig::default())
    }

    fn cube_at(id: &str, position: Vec3) -> Entity {
        Entity::new(id, unit_cube(crate::render::Color::WHITE)).with_position(position)
    }

    #[test]
    fn test_removal_is_total() {
        let mut engine = headless_engine();
        let count = Rc::new(RefCell::new(0));
        engine
            .add_entity(
                cube_at("a", Vec3::zeros()).with_behavior(CountUpdates {
                    count: Rc::clone(&count),
                }),
            )
            .unwrap();
        engine.add_entity(cube_at("b", Vec3::new(5.0, 0.0, 0.0))).unwrap();

        engine.start().unwrap();
        engine.tick().unwrap();
        assert_eq!(*count.borrow(), 1);

        engine.remove_entity("a").unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();

        assert_eq!(*count.borrow(), 1);
        assert!(engine.get_entity("a").is_none());
        assert!(engine.entities().all(|e| e.id() != "a"));
    }

    #[test]
    fn test_collision_symmetry() {
        let mut engine = headless_engine();
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        engine
            .add_entity(cube_at("a", Vec3::zeros()).with_behavior(RecordCollisions {
                seen: Rc::clone(&seen_a),
            }))
            .unwrap();
        engine
            .add_entity(
                cube_at("b", Vec3::new(0.4, 0.0, 0.0)).with_behavior(RecordCollisions {
                    seen: Rc::clone(&seen_b),
                }),
            )
            .unwrap();

        engine.start().unwrap();
        engine.tick().unwrap();

        assert_eq!(*seen_a.borrow(), vec!["b".to_owned()]);
        assert_eq!(*seen_b.borrow(), vec!["a".to_owned()]);
        assert_eq!(engine.stats().collision_pairs, 1);
    }

    #[test]
    fn test_scenario_overlap_fires_exactly_once() {
        let mut engine = headless_engine();
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        engine
            .add_entity(cube_at("a", Vec3::zeros()).with_behavior(RecordCollisions {
                seen: Rc::clone(&seen_a),
            }))
            .unwrap();
        engine
            .add_entity(
                cube_at("b", Vec3::new(10.0, 0.0, 0.0)).with_behavior(RecordCollisions {
                    seen: Rc::clone(&seen_b),
                }),
            )
            .unwrap();

        engine.start().unwrap();
        for _ in 0..10 {
            engine.tick().unwrap();
        }
        assert!(seen_a.borrow().is_empty());
        assert!(seen_b.borrow().is_empty());

        engine.get_entity_mut("b").unwrap().transform.position = Vec3::new(0.4, 0.0, 0.0);
        engine.tick().unwrap();

        assert_eq!(*seen_a.borrow(), vec!["b".to_owned()]);
        assert_eq!(*seen_b.borrow(), vec!["a".to_owned()]);
    }

    #[test]
    fn test_integration_matches_elapsed_time() {
        let mut engine = headless_engine();
        engine
            .add_entity(cube_at("ball", Vec3::zeros()).with_velocity(Vec3::zeros()))
            .unwrap();

        engine.start().unwrap();
        let mut last_y = 0.0_f32;
        for _ in 0..5 {
            sleep(Duration::from_millis(2));
            engine.tick().unwrap();

            let y = engine.get_entity("ball").unwrap().transform.position.y;
            assert!(y <= last_y, "position rose while falling");
            last_y = y;
        }

        let stats = engine.stats();
        let velocity = engine.get_entity("ball").unwrap().velocity.unwrap();
        assert!(stats.elapsed > 0.0);
        assert_relative_eq!(velocity.y, -9.81 * stats.elapsed, epsilon = 1e-3);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut engine = headless_engine();
        engine
            .add_entity(
                cube_at("ball", Vec3::zeros()).with_velocity(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();

        engine.start().unwrap();
        sleep(Duration::from_millis(2));
        engine.tick().unwrap();

        engine.pause().unwrap();
        let frozen_position = engine.get_entity("ball").unwrap().transform.position;
        let frozen_velocity = engine.get_entity("ball").unwrap().velocity.unwrap();

        for _ in 0..3 {
            sleep(Duration::from_millis(2));
            engine.tick().unwrap();
        }
        assert_eq!(
            engine.get_entity("ball").unwrap().transform.position,
            frozen_position
        );
        assert_eq!(engine.get_entity("ball").unwrap().velocity.unwrap(), frozen_velocity);

        engine.resume().unwrap();
        sleep(Duration::from_millis(2));
        engine.tick().unwrap();
        assert!(engine.get_entity("ball").unwrap().transform.position.x > frozen_position.x);
    }

    #[test]
    fn test_paused_engine_keeps_drawing() {
        let frames = Rc::new(RefCell::new(0));
        let released = Rc::new(RefCell::new(false));
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(CountingRenderer {
                frames: Rc::clone(&frames),
                released: Rc::clone(&released),
            }),
            Box::new(crate::scheduler::ManualScheduler::new()),
        );

        engine.start().unwrap();
        engine.tick().unwrap();
        engine.pause().unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();

        assert_eq!(*frames.borrow(), 3);
        assert_eq!(engine.stats().tick_count, 1);
    }

    #[test]
    fn test_disposal_is_terminal() {
        let mut engine = headless_engine();
        engine.dispose();

        assert!(matches!(
            engine.start(),
            Err(EngineError::InvalidState { operation: "start", .. })
        ));
        assert!(matches!(
            engine.add_entity(cube_at("a", Vec3::zeros())),
            Err(EngineError::InvalidState { .. })
        ));
        assert!(matches!(
            engine.resize(640, 480),
            Err(EngineError::InvalidState { .. })
        ));
        assert!(matches!(engine.tick(), Err(EngineError::InvalidState { .. })));

        // A second dispose is a no-op, not an error.
        engine.dispose();
        assert_eq!(engine.state(), EngineState::Disposed);
    }

    #[test]
    fn test_dispose_releases_renderer_and_entities() {
        let frames = Rc::new(RefCell::new(0));
        let released = Rc::new(RefCell::new(false));
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(CountingRenderer {
                frames: Rc::clone(&frames),
                released: Rc::clone(&released),
            }),
            Box::new(crate::scheduler::ManualScheduler::new()),
        );
        engine.add_entity(cube_at("a", Vec3::zeros())).unwrap();

        engine.dispose();
        assert!(*released.borrow());
        assert!(engine.registry().scene().is_empty());
    }

    #[test]
    fn test_renderer_failure_stops_loop() {
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(FailingRenderer),
            Box::new(crate::scheduler::ManualScheduler::new()),
        );

        engine.start().unwrap();
        assert!(matches!(engine.tick(), Err(EngineError::Renderer(_))));
        assert_eq!(engine.state(), EngineState::Idle);

        // Back at idle, further host ticks are harmless no-ops.
        engine.tick().unwrap();
    }

    #[test]
    fn test_physics_can_be_disabled_globally() {
        let config = EngineConfig {
            enable_physics: false,
            ..EngineConfig::default()
        };
        let mut engine = Engine::headless(config);
        engine
            .add_entity(
                cube_at("ball", Vec3::zeros()).with_velocity(Vec3::new(5.0, 0.0, 0.0)),
            )
            .unwrap();

        engine.start().unwrap();
        for _ in 0..3 {
            sleep(Duration::from_millis(2));
            engine.tick().unwrap();
        }

        assert_eq!(engine.get_entity("ball").unwrap().transform.position, Vec3::zeros());
    }

    #[test]
    fn test_duplicate_id_rejected_at_engine_level() {
        let mut engine = headless_engine();
        engine.add_entity(cube_at("a", Vec3::zeros())).unwrap();

        let result = engine.add_entity(cube_at("a", Vec3::zeros()));
        assert!(matches!(
            result,
            Err(EngineError::Scene(SceneError::DuplicateId { .. }))
        ));
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn test_observers_fire_each_tick() {
        let mut engine = headless_engine();
        let updates = Rc::new(RefCell::new(0));
        let renders = Rc::new(RefCell::new(0));

        let updates_in = Rc::clone(&updates);
        engine.set_on_update(Box::new(move |_dt| *updates_in.borrow_mut() += 1));
        let renders_in = Rc::clone(&renders);
        engine.set_on_render(Box::new(move |_dt| *renders_in.borrow_mut() += 1));

        engine.start().unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();

        assert_eq!(*updates.borrow(), 2);
        assert_eq!(*renders.borrow(), 2);
    }

    #[test]
    fn test_stop_is_restartable_and_idempotent() {
        let mut engine = headless_engine();
        engine.start().unwrap();
        engine.tick().unwrap();

        engine.stop().unwrap();
        engine.stop().unwrap();
        assert_eq!(engine.state(), EngineState::Idle);

        engine.start().unwrap();
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.stats().tick_count, 0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut engine = headless_engine();
        engine.resize(1920, 1080).unwrap();

        assert_eq!(engine.config().viewport_width, 1920);
        assert_eq!(engine.config().viewport_height, 1080);
    }

    #[test]
    fn test_run_for_drives_scheduler_and_stops() {
        let mut engine = headless_engine();
        engine
            .add_entity(cube_at("ball", Vec3::zeros()).with_velocity(Vec3::zeros()))
            .unwrap();

        engine.run_for(5).unwrap();

        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.stats().tick_count, 5);
        let velocity = engine.get_entity("ball").unwrap().velocity.unwrap();
        assert!(velocity.y <= 0.0);
    }
}
