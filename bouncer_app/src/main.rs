//! Bouncing-blocks game template
//!
//! A headless demo scene: spheres drop under gravity onto a floor and
//! bounce to rest while a scripted input source steers a paddle. Shows the
//! consumer surface of the engine: entity hooks, typed properties, an
//! injected input source, and a custom renderer bridge.

mod components;

use components::{Bouncer, OnGround, Paddle};
use rand::Rng;
use scene_engine::assets;
use scene_engine::prelude::*;

/// Input source that replays a pre-scripted key sequence, one poll per tick
struct ScriptedInput {
    script: Vec<(u64, InputEvent)>,
    cursor: usize,
    frame: u64,
}

impl ScriptedInput {
    fn new(script: Vec<(u64, InputEvent)>) -> Self {
        Self {
            script,
            cursor: 0,
            frame: 0,
        }
    }

    /// Hold Right from `press` until `release` (in frames)
    fn walk_right(press: u64, release: u64) -> Self {
        Self::new(vec![
            (press, InputEvent::Pressed(KeyCode::Right)),
            (release, InputEvent::Released(KeyCode::Right)),
        ])
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) {
        while self.cursor < self.script.len() && self.script[self.cursor].0 <= self.frame {
            events.push(self.script[self.cursor].1);
            self.cursor += 1;
        }
        self.frame += 1;
    }
}

/// Renderer bridge that reports scene state to the log once a second
#[derive(Default)]
struct ConsoleRenderer;

impl RendererBridge for ConsoleRenderer {
    fn draw(&mut self, frame: &FrameState<'_>) -> Result<(), RenderError> {
        if frame.tick % 60 == 0 {
            log::info!(
                "frame {}: {} nodes, {:.1}s simulated",
                frame.tick,
                frame.scene.len(),
                frame.elapsed
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EngineConfig {
        viewport_width: 960,
        viewport_height: 540,
        background_color: Color::rgb(0.05, 0.05, 0.1),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(
        config,
        Box::new(ConsoleRenderer),
        Box::new(TimerScheduler::new(60.0)),
    );
    engine.set_input_source(Box::new(ScriptedInput::walk_right(60, 180)));

    engine.add_entity(
        Entity::new("floor", assets::cuboid(Vec3::new(20.0, 0.5, 20.0), Color::rgb(0.3, 0.3, 0.3)))
            .with_name("Floor")
            .with_position(Vec3::new(0.0, -0.5, 0.0)),
    )?;

    engine.add_entity(
        Entity::new("paddle", assets::cuboid(Vec3::new(1.5, 0.25, 1.5), Color::rgb(0.2, 0.6, 0.9)))
            .with_name("Paddle")
            .with_position(Vec3::new(0.0, 0.25, 4.0))
            .with_behavior(Paddle { speed: 4.0 }),
    )?;

    let mut rng = rand::thread_rng();
    for i in 0..5 {
        engine.add_entity(
            Entity::new(
                format!("ball-{i}"),
                assets::sphere(0.5, Color::rgb(0.9, 0.4, 0.2)),
            )
            .with_position(Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(4.0..8.0),
                rng.gen_range(-4.0..4.0),
            ))
            .with_velocity(Vec3::zeros())
            .with_behavior(Bouncer { restitution: 0.7 }),
        )?;
    }

    engine.run_for(600)?;

    let stats = engine.stats();
    let settled = engine
        .entities()
        .filter(|entity| matches!(entity.properties.get::<OnGround>(), Some(OnGround(true))))
        .count();
    log::info!(
        "simulated {} ticks ({:.1}s, {:.0} fps avg): {} of 5 balls settled, paddle at x={:.2}",
        stats.tick_count,
        stats.elapsed,
        stats.average_fps,
        settled,
        engine
            .get_entity("paddle")
            .map_or(0.0, |paddle| paddle.transform.position.x),
    );

    engine.dispose();
    Ok(())
}
