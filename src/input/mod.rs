//! Keyboard and mouse state sampled once per frame
//!
//! The window event handlers feed raw events into [`InputState`]; the camera
//! controller then reads the held keys and the virtual cursor position when it
//! updates the camera for the frame.

pub mod bindings;
pub mod latch;

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

pub use bindings::{Action, KeyBindings};
pub use latch::ToggleLatch;

/// Held keys plus a virtual cursor accumulated from raw mouse motion
///
/// The cursor is virtual because a captured cursor never moves on screen;
/// raw device deltas keep arriving and are summed here instead.
#[derive(Debug, Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    cursor: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed.insert(code);
            }
            ElementState::Released => {
                self.pressed.remove(&code);
            }
        }
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.process_key(code, event.state);
        }
    }

    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.cursor.0 += delta.0;
        self.cursor.1 += delta.1;
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    pub fn is_action_pressed(&self, bindings: &KeyBindings, action: Action) -> bool {
        self.is_pressed(bindings.key(action))
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Forgets every held key, e.g. when the window loses focus and release
    /// events would otherwise never arrive
    pub fn clear_keys(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_held_until_released() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_pressed(KeyCode::KeyW));
        assert!(input.is_action_pressed(&KeyBindings::default(), Action::MoveForward));

        input.process_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn mouse_motion_accumulates_into_cursor() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -1.0));
        input.process_mouse_motion((2.0, 4.0));
        assert_eq!(input.cursor(), (5.0, 3.0));
    }

    #[test]
    fn clearing_keys_drops_everything_held() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyA, ElementState::Pressed);
        input.process_key(KeyCode::Space, ElementState::Pressed);
        input.clear_keys();
        assert!(!input.is_pressed(KeyCode::KeyA));
        assert!(!input.is_pressed(KeyCode::Space));
    }
}
