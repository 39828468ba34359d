//! Game-specific entity behaviors

use scene_engine::prelude::*;

/// Vertical speed below which a bounce is damped to rest
const REST_THRESHOLD: f32 = 0.5;

/// Property flag set once a bouncer has settled on its support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnGround(pub bool);

/// Bounces off whatever it lands on, losing energy each time
pub struct Bouncer {
    /// Fraction of vertical speed kept per bounce (0.0 to 1.0)
    pub restitution: f32,
}

impl Behavior for Bouncer {
    fn on_collision(
        &mut self,
        entity: &mut EntityCtx<'_>,
        other: &EntityView<'_>,
    ) -> Result<(), HookError> {
        let Some(velocity) = entity.velocity.as_mut() else {
            return Ok(());
        };

        // Only react to support underneath while moving down; overlaps with
        // siblings falling alongside are ignored.
        if velocity.y < 0.0 && other.transform.position.y < entity.transform.position.y {
            velocity.y = -velocity.y * self.restitution;
            if velocity.y < REST_THRESHOLD {
                velocity.y = 0.0;
                entity.properties.insert(OnGround(true));
            }
        }
        Ok(())
    }
}

/// Input-steered platform sliding along the X axis
pub struct Paddle {
    /// Movement speed in units per second
    pub speed: f32,
}

impl Behavior for Paddle {
    fn update(&mut self, entity: &mut EntityCtx<'_>, delta_time: f32) -> Result<(), HookError> {
        let mut direction = 0.0;
        if entity.input.is_pressed(KeyCode::Left) {
            direction -= 1.0;
        }
        if entity.input.is_pressed(KeyCode::Right) {
            direction += 1.0;
        }
        entity.transform.position.x += direction * self.speed * delta_time;
        Ok(())
    }
}
