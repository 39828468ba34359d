//! Renderer bridge
//!
//! Rendering is an external collaborator: the engine hands the current
//! scene state to a [`RendererBridge`] once per tick and knows nothing
//! about rasterization, shaders, or GPU resource lifetime. A failure from
//! [`RendererBridge::draw`] is fatal and stops the frame loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::graph::SceneGraph;

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create an opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Unrecoverable drawing failures.
///
/// Any of these ends the frame loop; the engine returns to idle and
/// propagates the error to the caller.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The graphics context was lost and cannot be restored
    #[error("graphics context lost: {0}")]
    ContextLost(String),

    /// Frame submission was rejected by the backend
    #[error("draw submission failed: {0}")]
    DrawFailed(String),
}

/// Scene state handed to the renderer each tick
pub struct FrameState<'a> {
    /// The live scene graph with per-node world transforms
    pub scene: &'a SceneGraph,

    /// Viewport dimensions in pixels
    pub viewport: (u32, u32),

    /// Clear color for the frame
    pub background: Color,

    /// Total simulated time in seconds
    pub elapsed: f32,

    /// Tick number of this frame
    pub tick: u64,
}

/// External rendering collaborator.
///
/// The engine calls [`RendererBridge::draw`] once per tick after all
/// simulation work is done and never mutates entity state afterwards within
/// the same tick.
pub trait RendererBridge {
    /// Draw one frame from the given scene state
    fn draw(&mut self, frame: &FrameState<'_>) -> Result<(), RenderError>;

    /// Adjust to a new viewport size
    fn resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Release renderer-owned resources.
    ///
    /// Called exactly once, from `Engine::dispose`, after the last tick has
    /// finished.
    fn release(&mut self) {}
}

/// Renderer that draws nothing and never fails.
///
/// Useful for tests and headless simulation runs.
#[derive(Default)]
pub struct HeadlessRenderer {
    frames_drawn: u64,
    viewport: (u32, u32),
    released: bool,
}

impl HeadlessRenderer {
    /// Create a new headless renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Last viewport size passed to `resize`
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether `release` has been called
    pub fn released(&self) -> bool {
        self.released
    }
}

impl RendererBridge for HeadlessRenderer {
    fn draw(&mut self, frame: &FrameState<'_>) -> Result<(), RenderError> {
        self.frames_drawn += 1;
        log::trace!(
            "headless draw: tick {} with {} nodes",
            frame.tick,
            frame.scene.len()
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constructors() {
        let c = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(c.a, 1.0);

        let c = Color::rgba(0.0, 0.0, 0.0, 0.5);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_headless_renderer_counts_frames() {
        let scene = SceneGraph::new();
        let mut renderer = HeadlessRenderer::new();

        let frame = FrameState {
            scene: &scene,
            viewport: (640, 480),
            background: Color::BLACK,
            elapsed: 0.0,
            tick: 1,
        };
        renderer.draw(&frame).unwrap();
        renderer.draw(&frame).unwrap();

        assert_eq!(renderer.frames_drawn(), 2);
    }
}
