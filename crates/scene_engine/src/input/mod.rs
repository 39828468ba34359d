//! Input source abstraction
//!
//! Input reaches the engine through an explicitly injected [`InputSource`]
//! rather than ambient global listeners. The engine polls the source once
//! per tick into an [`InputState`] snapshot that hooks read, and the source
//! is dropped deterministically at `Engine::dispose` so nothing outlives
//! the instance.

use std::collections::HashSet;

/// Keys the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Space bar
    Space,
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Escape key
    Escape,
}

/// A single input state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down
    Pressed(KeyCode),
    /// A key went up
    Released(KeyCode),
}

/// Snapshot of currently held keys, rebuilt from events each tick
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given key is currently held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether any key is currently held
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub(crate) fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(key) => {
                self.pressed.insert(key);
            }
            InputEvent::Released(key) => {
                self.pressed.remove(&key);
            }
        }
    }
}

/// Injected provider of input events.
///
/// Implementations wrap whatever the host offers: a window event queue, a
/// terminal, or a scripted sequence for tests and demos.
pub trait InputSource {
    /// Drain pending events into the given buffer
    fn poll(&mut self, events: &mut Vec<InputEvent>);
}

/// Input source that never produces events
#[derive(Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn poll(&mut self, _events: &mut Vec<InputEvent>) {}
}
